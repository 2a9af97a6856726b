use crate::model::User;

/// Which user, if any, is open in the detail overlay
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SelectionState {
    selected: Option<i64>,
}

impl SelectionState {
    /// Open the overlay for `user`, replacing any record already shown
    pub fn select(&mut self, user: &User) {
        self.selected = Some(user.id);
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    pub fn is_open(&self) -> bool {
        self.selected.is_some()
    }

    pub fn selected_id(&self) -> Option<i64> {
        self.selected
    }

    /// Look the selected record up in the collection it was taken from
    pub fn resolve<'a>(&self, users: &'a [User]) -> Option<&'a User> {
        let id = self.selected?;
        users.iter().find(|u| u.id == id)
    }
}
