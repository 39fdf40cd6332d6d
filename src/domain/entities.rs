//! Domain entities: staff members and their handles

use std::fmt;

use generational_arena::Index;

/// Handle to a staff member inside an [`OrgChart`](crate::domain::OrgChart).
///
/// Handles are generational: once a member is fired, its handle goes stale and
/// is never confused with a member recruited later into the same slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StaffId(pub(crate) Index);

impl fmt::Display for StaffId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (slot, generation) = self.0.into_raw_parts();
        write!(f, "#{}.{}", slot, generation)
    }
}

/// Kind of a staff member.
///
/// Only members of the same kind as the chart's root can be hired into it.
/// `Employee` is a plain worker record that never joins a staff chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StaffKind {
    #[default]
    Staff,
    Employee,
}

impl fmt::Display for StaffKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StaffKind::Staff => write!(f, "staff"),
            StaffKind::Employee => write!(f, "employee"),
        }
    }
}

/// Payload of a tree node: one staff member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Staff {
    /// Display name, not required to be unique
    pub name: String,
    pub kind: StaffKind,
}

impl Staff {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: StaffKind::Staff,
        }
    }

    pub fn employee(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: StaffKind::Employee,
        }
    }
}

impl fmt::Display for Staff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
