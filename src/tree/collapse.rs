use std::collections::HashSet;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CollapseState {
    spouse_rows: HashSet<String>,
    children: HashSet<String>,
}

impl CollapseState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_spouse_row_collapsed(&self, primary_id: &str) -> bool {
        self.spouse_rows.contains(primary_id)
    }

    pub fn are_children_collapsed(&self, parent_identity: &str) -> bool {
        self.children.contains(parent_identity)
    }

    /// Returns whether the row is collapsed after the toggle.
    pub fn toggle_spouse_row(&mut self, primary_id: &str) -> bool {
        toggle(&mut self.spouse_rows, primary_id)
    }

    /// Returns whether the children are collapsed after the toggle.
    pub fn toggle_children(&mut self, parent_identity: &str) -> bool {
        toggle(&mut self.children, parent_identity)
    }

    pub fn is_empty(&self) -> bool {
        self.spouse_rows.is_empty() && self.children.is_empty()
    }

    pub fn clear(&mut self) {
        self.spouse_rows.clear();
        self.children.clear();
    }
}

fn toggle(set: &mut HashSet<String>, id: &str) -> bool {
    if set.remove(id) {
        false
    } else {
        set.insert(id.to_owned());
        true
    }
}
