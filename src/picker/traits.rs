//! Picker trait definition

/// A list with a single row cursor.
///
/// Table screens implement the three required methods and get wrapping
/// navigation and the current row for free.
///
/// # Example
///
/// ```ignore
/// impl Picker for EmployeeListScreen {
///     type Item = Employee;
///
///     fn items(&self) -> &[Employee] {
///         self.employees.items()
///     }
///
///     fn selected_index(&self) -> usize {
///         self.selected
///     }
///
///     fn set_selected_index(&mut self, index: usize) {
///         self.selected = index;
///     }
/// }
/// ```
pub trait Picker {
    type Item;

    fn items(&self) -> &[Self::Item];

    fn selected_index(&self) -> usize;

    fn set_selected_index(&mut self, index: usize);

    fn len(&self) -> usize {
        self.items().len()
    }

    fn is_empty(&self) -> bool {
        self.items().is_empty()
    }

    /// Select the next row (wraps around)
    fn select_next(&mut self) {
        if !self.is_empty() {
            let next = (self.selected_index() + 1) % self.len();
            self.set_selected_index(next);
        }
    }

    /// Select the previous row (wraps around)
    fn select_prev(&mut self) {
        if !self.is_empty() {
            let prev = self
                .selected_index()
                .checked_sub(1)
                .unwrap_or(self.len() - 1);
            self.set_selected_index(prev);
        }
    }

    fn selected_item(&self) -> Option<&Self::Item> {
        self.items().get(self.selected_index())
    }

    /// Pull the cursor back inside the list after it shrank.
    fn clamp_selection(&mut self) {
        let max = self.len().saturating_sub(1);
        if self.selected_index() > max {
            self.set_selected_index(max);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Rows {
        items: Vec<&'static str>,
        selected: usize,
    }

    impl Picker for Rows {
        type Item = &'static str;

        fn items(&self) -> &[&'static str] {
            &self.items
        }

        fn selected_index(&self) -> usize {
            self.selected
        }

        fn set_selected_index(&mut self, index: usize) {
            self.selected = index;
        }
    }

    #[test]
    fn test_navigation_wraps() {
        let mut rows = Rows { items: vec!["a", "b", "c"], selected: 0 };
        rows.select_prev();
        assert_eq!(rows.selected_item(), Some(&"c"));
        rows.select_next();
        assert_eq!(rows.selected_item(), Some(&"a"));
    }

    #[test]
    fn test_clamp_after_shrink() {
        let mut rows = Rows { items: vec!["a", "b", "c"], selected: 2 };
        rows.items.truncate(1);
        rows.clamp_selection();
        assert_eq!(rows.selected_index(), 0);
    }

    #[test]
    fn test_empty_list_is_inert() {
        let mut rows = Rows { items: vec![], selected: 0 };
        rows.select_next();
        rows.select_prev();
        assert_eq!(rows.selected_item(), None);
    }
}
