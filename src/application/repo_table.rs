//! The displayed repository table.
//!
//! Rows are only ever installed wholesale by [`RepoTable::replace`]; nothing edits
//! a single row, so a row can never outlive the snapshot that produced it.

use crate::domain::RepoView;

/// Row ordering. Backends do not promise a stable order, so `Name` is offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Snapshot,
    Name,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Snapshot => "snapshot",
            SortOrder::Name => "name",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            SortOrder::Snapshot => SortOrder::Name,
            SortOrder::Name => SortOrder::Snapshot,
        }
    }
}

/// Orders `views` in place. Name order breaks ties by id so it is total.
pub fn sort_views(views: &mut [RepoView], order: SortOrder) {
    if order == SortOrder::Name {
        views.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.id.cmp(&b.id))
        });
    }
}

#[derive(Debug, Default)]
pub struct RepoTable {
    /// Rows as received, before sorting.
    received: Vec<RepoView>,
    rows: Vec<RepoView>,
    order: SortOrder,
    selected: Option<usize>,
    generation: u64,
}

impl RepoTable {
    pub fn new(order: SortOrder) -> Self {
        Self {
            order,
            ..Self::default()
        }
    }

    /// Discards every current row and installs `views`.
    ///
    /// The selection follows the previously selected repository id when it is
    /// still present; otherwise it is clamped to the new row count.
    pub fn replace(&mut self, views: Vec<RepoView>) {
        self.received = views;
        self.generation += 1;
        self.rebuild();
    }

    pub fn set_order(&mut self, order: SortOrder) {
        if self.order != order {
            self.order = order;
            self.rebuild();
        }
    }

    fn rebuild(&mut self) {
        let previous_id = self.selected_row().map(|row| row.id.clone());
        let previous_index = self.selected;

        let mut rows = self.received.clone();
        sort_views(&mut rows, self.order);
        self.rows = rows;

        self.selected = if self.rows.is_empty() {
            None
        } else if let Some(index) = previous_id
            .as_deref()
            .and_then(|id| self.rows.iter().position(|row| row.id == id))
        {
            Some(index)
        } else {
            Some(previous_index.unwrap_or(0).min(self.rows.len() - 1))
        };
    }

    pub fn rows(&self) -> &[RepoView] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn order(&self) -> SortOrder {
        self.order
    }

    /// Number of replacements applied so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_row(&self) -> Option<&RepoView> {
        self.selected.and_then(|i| self.rows.get(i))
    }

    pub fn select_next(&mut self) {
        if let Some(i) = self.selected {
            if i + 1 < self.rows.len() {
                self.selected = Some(i + 1);
            }
        }
    }

    pub fn select_previous(&mut self) {
        if let Some(i) = self.selected {
            self.selected = Some(i.saturating_sub(1));
        }
    }

    /// Identifier bound to the selected row's removal control, taken verbatim.
    pub fn removal_target(&self) -> Option<String> {
        self.selected_row().map(|row| row.id.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Completion;

    fn view(id: &str, name: &str) -> RepoView {
        RepoView {
            id: id.to_string(),
            name: name.to_string(),
            kind: "share".to_string(),
            root: format!("/srv/{id}"),
            done_bytes: 0,
            missing_bytes: 0,
            completion: Completion::NoData,
            files_total: 0,
            files_complete: 0,
            files: Vec::new(),
        }
    }

    fn ids(table: &RepoTable) -> Vec<&str> {
        table.rows().iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_replace_leaves_no_residual_rows() {
        let mut table = RepoTable::new(SortOrder::Snapshot);
        table.replace(vec![view("a", "A"), view("b", "B"), view("c", "C")]);
        table.replace(vec![view("c", "C"), view("d", "D")]);

        assert_eq!(ids(&table), vec!["c", "d"]);
        assert_eq!(table.generation(), 2);
    }

    #[test]
    fn test_replace_keeps_snapshot_order() {
        let mut table = RepoTable::new(SortOrder::Snapshot);
        table.replace(vec![view("z", "Zed"), view("a", "Alpha")]);

        assert_eq!(ids(&table), vec!["z", "a"]);
    }

    #[test]
    fn test_name_order() {
        let mut table = RepoTable::new(SortOrder::Name);
        table.replace(vec![view("2", "beta"), view("1", "Alpha"), view("0", "beta")]);

        assert_eq!(ids(&table), vec!["1", "0", "2"]);

        table.set_order(SortOrder::Snapshot);
        assert_eq!(ids(&table), vec!["2", "1", "0"]);
    }

    #[test]
    fn test_selection_follows_id() {
        let mut table = RepoTable::new(SortOrder::Snapshot);
        table.replace(vec![view("a", "A"), view("b", "B"), view("c", "C")]);
        table.select_next();
        assert_eq!(table.removal_target().as_deref(), Some("b"));

        table.replace(vec![view("x", "X"), view("a", "A"), view("b", "B")]);
        assert_eq!(table.removal_target().as_deref(), Some("b"));
    }

    #[test]
    fn test_selection_clamps_when_row_disappears() {
        let mut table = RepoTable::new(SortOrder::Snapshot);
        table.replace(vec![view("a", "A"), view("b", "B"), view("c", "C")]);
        table.select_next();
        table.select_next();
        assert_eq!(table.selected(), Some(2));

        table.replace(vec![view("a", "A")]);
        assert_eq!(table.selected(), Some(0));

        table.replace(Vec::new());
        assert_eq!(table.selected(), None);
        assert!(table.removal_target().is_none());
    }

    #[test]
    fn test_sort_order_toggle() {
        assert_eq!(SortOrder::Snapshot.toggled(), SortOrder::Name);
        assert_eq!(SortOrder::Name.toggled(), SortOrder::Snapshot);
        assert_eq!(SortOrder::Name.as_str(), "name");
    }
}
