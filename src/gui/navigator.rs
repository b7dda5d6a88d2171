//! Selection state of the viewer, kept apart from egui so it can be tested.

use crate::{
    error::Result,
    store::{Region, Scope, Store, View, ViewTable},
};

pub const SELECT_PROMPT: &str = "天気情報を選択してください。";
pub const NOT_FOUND: &str = "天気情報が見つかりません。";
pub const NO_AREAS: &str = "データベースに地域データがありません。";

pub struct Navigator {
    regions: Vec<Region>,
    region: Option<String>,
    office: Option<String>,
    sub_area: Option<String>,
    view: View,
    date: Option<String>,
    dates: Vec<String>,
    table: ViewTable,
    dirty: bool,
}

impl Navigator {
    pub fn new(regions: Vec<Region>) -> Self {
        Self {
            regions,
            region: None,
            office: None,
            sub_area: None,
            view: View::Weather,
            date: None,
            dates: Vec::new(),
            table: ViewTable::default(),
            dirty: true,
        }
    }

    pub fn load(store: &Store) -> Result<Self> {
        Ok(Self::new(store.region_hierarchy()?))
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    pub fn office(&self) -> Option<&str> {
        self.office.as_deref()
    }

    pub fn sub_area(&self) -> Option<&str> {
        self.sub_area.as_deref()
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn date(&self) -> Option<&str> {
        self.date.as_deref()
    }

    /// Dates offered for the current view and scope.
    pub fn dates(&self) -> &[String] {
        &self.dates
    }

    pub fn table(&self) -> &ViewTable {
        &self.table
    }

    /// The innermost selected level: a sub-area wins over its office.
    pub fn scope(&self) -> Option<Scope> {
        match (&self.sub_area, &self.office) {
            (Some(sub_area), _) => Some(Scope::SubArea(sub_area.clone())),
            (None, Some(office)) => Some(Scope::Office(office.clone())),
            (None, None) => None,
        }
    }

    pub fn select_region(&mut self, id: &str) {
        if self.region.as_deref() == Some(id) && self.office.is_none() {
            return;
        }
        self.region = Some(id.to_string());
        self.office = None;
        self.sub_area = None;
        self.date = None;
        self.dirty = true;
    }

    pub fn select_office(&mut self, id: &str) {
        if self.office.as_deref() == Some(id) && self.sub_area.is_none() {
            return;
        }
        self.region = self
            .regions
            .iter()
            .find(|region| region.offices.iter().any(|office| office.id == id))
            .map(|region| region.id.clone());
        self.office = Some(id.to_string());
        self.sub_area = None;
        self.date = None;
        self.dirty = true;
    }

    pub fn select_sub_area(&mut self, id: &str) {
        if self.sub_area.as_deref() == Some(id) {
            return;
        }
        for region in &self.regions {
            for office in &region.offices {
                if office.sub_areas.iter().any(|sub_area| sub_area.id == id) {
                    self.region = Some(region.id.clone());
                    self.office = Some(office.id.clone());
                }
            }
        }
        self.sub_area = Some(id.to_string());
        self.date = None;
        self.dirty = true;
    }

    pub fn select_view(&mut self, view: View) {
        if self.view != view {
            self.view = view;
            self.dirty = true;
        }
    }

    pub fn select_date(&mut self, date: Option<String>) {
        if self.date != date {
            self.date = date;
            self.dirty = true;
        }
    }

    /// Re-queries dates and rows if the selection changed since the last call.
    /// A failed query empties the table and is retried on the next call.
    pub fn refresh(&mut self, store: &Store) -> Result<bool> {
        if !self.dirty {
            return Ok(false);
        }

        let Some(scope) = self.scope() else {
            self.dates.clear();
            self.table = ViewTable::default();
            self.dirty = false;
            return Ok(true);
        };

        match self.query(store, &scope) {
            Ok((dates, date, table)) => {
                self.dates = dates;
                self.date = date;
                self.table = table;
                self.dirty = false;
                Ok(true)
            }
            Err(e) => {
                self.dates.clear();
                self.table = ViewTable::default();
                Err(e)
            }
        }
    }

    fn query(&self, store: &Store, scope: &Scope) -> Result<(Vec<String>, Option<String>, ViewTable)> {
        let dates = store.time_defines(self.view, scope)?;
        let date = self.date.clone().filter(|date| dates.contains(date));
        let table = store.view_rows(self.view, scope, date.as_deref())?;

        Ok((dates, date, table))
    }

    /// Placeholder text for the central panel, if there is nothing to list.
    pub fn message(&self) -> Option<&'static str> {
        if self.regions.is_empty() {
            Some(NO_AREAS)
        } else if self.scope().is_none() {
            Some(SELECT_PROMPT)
        } else if self.table.is_empty() {
            Some(NOT_FOUND)
        } else {
            None
        }
    }
}
