//! Region → office → sub-area tree read back from the `areas` table.

use super::Store;
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubArea {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Office {
    pub id: String,
    pub name: String,
    pub sub_areas: Vec<SubArea>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub id: String,
    pub name: String,
    pub offices: Vec<Office>,
}

struct HierarchyRow {
    center_id: String,
    center_name: String,
    office_id: String,
    office_name: String,
    class10_id: String,
    class10_name: String,
}

/// Folds ordered rows into the tree, keeping first-seen order at every level.
fn build_tree(rows: Vec<HierarchyRow>) -> Vec<Region> {
    let mut regions: Vec<Region> = Vec::new();

    for row in rows {
        let region_pos = match regions.iter().position(|r| r.id == row.center_id) {
            Some(pos) => pos,
            None => {
                regions.push(Region {
                    id: row.center_id,
                    name: row.center_name,
                    offices: Vec::new(),
                });
                regions.len() - 1
            }
        };
        let region = &mut regions[region_pos];

        let office_pos = match region.offices.iter().position(|o| o.id == row.office_id) {
            Some(pos) => pos,
            None => {
                region.offices.push(Office {
                    id: row.office_id,
                    name: row.office_name,
                    sub_areas: Vec::new(),
                });
                region.offices.len() - 1
            }
        };
        let office = &mut region.offices[office_pos];

        if !row.class10_id.is_empty() && office.sub_areas.iter().all(|s| s.id != row.class10_id) {
            office.sub_areas.push(SubArea {
                id: row.class10_id,
                name: row.class10_name,
            });
        }
    }

    regions
}

impl Store {
    /// The centers → offices → class10s tree stored in `areas`.
    pub fn region_hierarchy(&self) -> Result<Vec<Region>> {
        let mut stmt = self.conn.prepare(
            r#"
                SELECT centers_id, centers_name, offices_id, offices_name,
                       class10s_id, class10s_name, MIN(id) AS first
                FROM areas
                GROUP BY centers_id, centers_name, offices_id, offices_name,
                         class10s_id, class10s_name
                ORDER BY first
            "#,
        )?;

        let rows = stmt
            .query_map([], |row| {
                Ok(HierarchyRow {
                    center_id: row.get::<_, Option<String>>(0)?.unwrap_or_default(),
                    center_name: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                    office_id: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                    office_name: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
                    class10_id: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
                    class10_name: row.get::<_, Option<String>>(5)?.unwrap_or_default(),
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(build_tree(rows))
    }
}
