use crate::catalog::{Catalog, LineupRecord, Map, Side, UtilityType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionStage {
    NoMap,
    MapOnly,
    MapAndSide,
    FullSelection,
}

/// The three ordered choices. Each step is only accepted once the previous one is set,
/// and changing a step clears every step after it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    map: Option<Map>,
    side: Option<Side>,
    utility_type: Option<UtilityType>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn map(&self) -> Option<Map> {
        self.map
    }

    pub fn side(&self) -> Option<Side> {
        self.side
    }

    pub fn utility_type(&self) -> Option<UtilityType> {
        self.utility_type
    }

    pub fn stage(&self) -> SelectionStage {
        match (self.map, self.side, self.utility_type) {
            (None, _, _) => SelectionStage::NoMap,
            (Some(_), None, _) => SelectionStage::MapOnly,
            (Some(_), Some(_), None) => SelectionStage::MapAndSide,
            (Some(_), Some(_), Some(_)) => SelectionStage::FullSelection,
        }
    }

    pub fn side_enabled(&self) -> bool {
        self.map.is_some()
    }

    pub fn utility_enabled(&self) -> bool {
        self.map.is_some() && self.side.is_some()
    }

    pub fn choose_map(&mut self, map: Map) {
        self.map = Some(map);
        self.side = None;
        self.utility_type = None;
    }

    /// Returns `false` and leaves the selection untouched when no map is chosen yet.
    pub fn choose_side(&mut self, side: Side) -> bool {
        if !self.side_enabled() {
            return false;
        }
        self.side = Some(side);
        self.utility_type = None;
        true
    }

    /// Returns `false` and leaves the selection untouched until map and side are chosen.
    pub fn choose_utility_type(&mut self, utility_type: UtilityType) -> bool {
        if !self.utility_enabled() {
            return false;
        }
        self.utility_type = Some(utility_type);
        true
    }

    pub fn triple(&self) -> Option<(Map, Side, UtilityType)> {
        Some((self.map?, self.side?, self.utility_type?))
    }
}

/// Selection state bound to the catalog it filters.
#[derive(Debug, Clone)]
pub struct SelectionEngine<'a> {
    catalog: &'a Catalog,
    selection: Selection,
}

impl<'a> SelectionEngine<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            selection: Selection::new(),
        }
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn choose_map(&mut self, map: Map) {
        self.selection.choose_map(map);
    }

    pub fn choose_side(&mut self, side: Side) -> bool {
        self.selection.choose_side(side)
    }

    pub fn choose_utility_type(&mut self, utility_type: UtilityType) -> bool {
        self.selection.choose_utility_type(utility_type)
    }

    pub fn visible_lineups(&self) -> Vec<&'a LineupRecord> {
        visible_lineups(self.catalog, &self.selection)
    }

    pub fn summary(&self) -> String {
        results_summary(&self.selection, self.visible_lineups().len())
    }
}

/// Every catalog record matching the full selection, in catalog order.
/// Empty unless map, side and utility type are all chosen.
pub fn visible_lineups<'a>(catalog: &'a Catalog, selection: &Selection) -> Vec<&'a LineupRecord> {
    match selection.triple() {
        Some((map, side, utility_type)) => catalog.lineups_for(map, side, utility_type),
        None => Vec::new(),
    }
}

pub fn results_summary(selection: &Selection, visible: usize) -> String {
    let Some((map, side, utility_type)) = selection.triple() else {
        return "Pick map, side and utility to see lineups.".to_string();
    };
    if visible == 0 {
        return "No lineups registered for this combination yet.".to_string();
    }
    format!("{visible} lineup(s) for {utility_type} on {map} ({side})")
}
