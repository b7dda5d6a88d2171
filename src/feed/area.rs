//! The area hierarchy published at `common/const/area.json`.

use std::collections::BTreeMap;

use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AreaEntry {
    pub name: String,
    pub en_name: Option<String>,
    pub office_name: Option<String>,
    pub kana: Option<String>,
    pub parent: Option<String>,
    pub children: Vec<String>,
}

/// All five levels of the hierarchy, each keyed by area code.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AreaCatalog {
    pub centers: BTreeMap<String, AreaEntry>,
    pub offices: BTreeMap<String, AreaEntry>,
    pub class10s: BTreeMap<String, AreaEntry>,
    pub class15s: BTreeMap<String, AreaEntry>,
    pub class20s: BTreeMap<String, AreaEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AreaNode {
    pub id: String,
    pub name: String,
}

/// One row of the `areas` table: the chain from a center down to a class20 leaf.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AreaPath {
    pub center: AreaNode,
    pub office: AreaNode,
    pub class10: AreaNode,
    pub class15: AreaNode,
    pub class20: AreaNode,
}

fn lookup<'a>(level: &'a BTreeMap<String, AreaEntry>, id: &str) -> (AreaNode, &'a [String]) {
    match level.get(id) {
        Some(entry) => (
            AreaNode {
                id: id.to_string(),
                name: entry.name.clone(),
            },
            &entry.children,
        ),
        None => (
            AreaNode {
                id: id.to_string(),
                name: String::new(),
            },
            &[],
        ),
    }
}

impl AreaCatalog {
    /// Walks centers → offices → class10s → class15s → class20s, one path per leaf.
    ///
    /// A branch that stops before class20 contributes nothing.
    pub fn paths(&self) -> Vec<AreaPath> {
        let mut paths = Vec::new();

        for (center_id, center_entry) in &self.centers {
            let center = AreaNode {
                id: center_id.clone(),
                name: center_entry.name.clone(),
            };

            for office_id in &center_entry.children {
                let (office, class10_ids) = lookup(&self.offices, office_id);

                for class10_id in class10_ids {
                    let (class10, class15_ids) = lookup(&self.class10s, class10_id);

                    for class15_id in class15_ids {
                        let (class15, class20_ids) = lookup(&self.class15s, class15_id);

                        for class20_id in class20_ids {
                            let (class20, _) = lookup(&self.class20s, class20_id);

                            paths.push(AreaPath {
                                center: center.clone(),
                                office: office.clone(),
                                class10: class10.clone(),
                                class15: class15.clone(),
                                class20,
                            });
                        }
                    }
                }
            }
        }

        paths
    }

    /// Office codes listed under the centers, in center order.
    pub fn office_codes(&self) -> Vec<String> {
        let mut codes: Vec<String> = Vec::new();

        for center in self.centers.values() {
            for office_id in &center.children {
                if !codes.contains(office_id) {
                    codes.push(office_id.clone());
                }
            }
        }

        codes
    }
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn catalog_fixture() -> AreaCatalog {
        serde_json::from_value(serde_json::json!({
            "centers": {
                "010100": {"name": "北海道地方", "enName": "Hokkaido", "officeName": "札幌管区気象台", "children": ["011000", "016000"]},
                "010300": {"name": "関東甲信地方", "enName": "Kanto Koshin", "children": ["130000"]}
            },
            "offices": {
                "011000": {"name": "宗谷地方", "parent": "010100", "children": ["011000"]},
                "016000": {"name": "石狩・空知・後志地方", "parent": "010100", "children": ["016010", "016020"]},
                "130000": {"name": "東京都", "parent": "010300", "children": ["130010"]}
            },
            "class10s": {
                "011000": {"name": "宗谷地方", "parent": "011000", "children": ["011011"]},
                "016010": {"name": "石狩地方", "parent": "016000", "children": ["016011", "016012"]},
                "016020": {"name": "空知地方", "parent": "016000", "children": ["016021"]},
                "130010": {"name": "東京地方", "parent": "130000", "children": ["130011"]}
            },
            "class15s": {
                "011011": {"name": "宗谷北部", "parent": "011000", "children": ["0151100"]},
                "016011": {"name": "石狩北部", "parent": "016010", "children": ["0130300", "0130400"]},
                "016012": {"name": "石狩中部", "parent": "016010", "children": ["0110000"]},
                "016021": {"name": "空知北部", "parent": "016020", "children": []},
                "130011": {"name": "２３区西部", "parent": "130010", "children": ["1310100"]}
            },
            "class20s": {
                "0151100": {"name": "稚内市", "kana": "わっかないし", "parent": "011011"},
                "0130300": {"name": "石狩市", "parent": "016011"},
                "0130400": {"name": "当別町", "parent": "016011"},
                "0110000": {"name": "札幌市", "parent": "016012"},
                "1310100": {"name": "千代田区", "parent": "130011"}
            }
        }))
        .unwrap()
    }

    #[test]
    fn should_emit_one_path_per_class20() {
        let catalog = catalog_fixture();
        let paths = catalog.paths();

        assert_eq!(paths.len(), 5);
        assert_eq!(paths[0].center.name, "北海道地方");
        assert_eq!(paths[0].class20.name, "稚内市");

        let sapporo = paths.iter().find(|p| p.class20.id == "0110000").unwrap();
        assert_eq!(sapporo.office.id, "016000");
        assert_eq!(sapporo.class10.name, "石狩地方");
        assert_eq!(sapporo.class15.name, "石狩中部");
    }

    #[test]
    fn should_skip_branches_without_leaves() {
        let catalog = catalog_fixture();
        let paths = catalog.paths();

        assert!(paths.iter().all(|p| p.class15.id != "016021"));
    }

    #[test]
    fn should_use_empty_name_for_unknown_child() {
        let mut catalog = catalog_fixture();
        catalog
            .class15s
            .get_mut("130011")
            .unwrap()
            .children
            .push("9999999".to_string());

        let paths = catalog.paths();
        let unknown = paths.iter().find(|p| p.class20.id == "9999999").unwrap();

        assert_eq!(unknown.class20.name, "");
        assert_eq!(unknown.office.name, "東京都");
    }

    #[test]
    fn should_list_office_codes_in_center_order() {
        let catalog = catalog_fixture();
        assert_eq!(catalog.office_codes(), vec!["011000", "016000", "130000"]);
    }

    #[test]
    fn should_default_missing_levels() {
        let catalog: AreaCatalog = serde_json::from_str(r#"{"centers": {}}"#).unwrap();

        assert!(catalog.paths().is_empty());
        assert!(catalog.office_codes().is_empty());
    }
}
