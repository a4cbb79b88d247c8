use serde::{Deserialize, Serialize};

/// Three-state update for a nullable task field.
///
/// `NoChange` keeps the current value, `Set` replaces it and `Clear` sets it to
/// `None`. On the wire it is written as `{"op": "set", "value": ...}` or
/// `{"op": "clear"}`; an absent field means `NoChange`.
///
/// ```
/// use taskflow_domain::FieldUpdate;
///
/// let mut due = Some(3);
/// FieldUpdate::Set(5).apply_to(&mut due);
/// assert_eq!(due, Some(5));
///
/// FieldUpdate::<i32>::Clear.apply_to(&mut due);
/// assert_eq!(due, None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", content = "value", rename_all = "camelCase")]
pub enum FieldUpdate<T> {
    NoChange,
    Set(T),
    Clear,
}

impl<T> Default for FieldUpdate<T> {
    fn default() -> Self {
        FieldUpdate::NoChange
    }
}

impl<T> FieldUpdate<T> {
    pub fn apply_to(self, field: &mut Option<T>) {
        match self {
            FieldUpdate::NoChange => {}
            FieldUpdate::Set(value) => *field = Some(value),
            FieldUpdate::Clear => *field = None,
        }
    }

    pub fn is_change(&self) -> bool {
        !matches!(self, FieldUpdate::NoChange)
    }

    pub fn is_no_change(&self) -> bool {
        !self.is_change()
    }
}

impl<T> From<Option<T>> for FieldUpdate<T> {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(value) => FieldUpdate::Set(value),
            None => FieldUpdate::Clear,
        }
    }
}
