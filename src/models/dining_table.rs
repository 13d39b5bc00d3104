use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TableStatus {
    Available,
    Occupied,
    Reserved,
    Cleaning,
}

impl TableStatus {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            TableStatus::Available => "available",
            TableStatus::Occupied => "occupied",
            TableStatus::Reserved => "reserved",
            TableStatus::Cleaning => "cleaning",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "available" => Some(TableStatus::Available),
            "occupied" => Some(TableStatus::Occupied),
            "reserved" => Some(TableStatus::Reserved),
            "cleaning" => Some(TableStatus::Cleaning),
            _ => None,
        }
    }
}

/// Dining table (`tables`)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiningTable {
    pub table_id: i32,          // ⇔ tables.table_id (SERIAL)
    pub table_name: String,     // ⇔ tables.table_name (VARCHAR(50))
    pub status: Option<String>, // ⇔ tables.status (VARCHAR(20), default 'available')
}

impl DiningTable {
    /// Known status, if the stored text is one of the standard values.
    pub fn status_kind(&self) -> Option<TableStatus> {
        self.status.as_deref().and_then(TableStatus::from_db_str)
    }

    /// A status is stored but it is none of the standard values.
    pub fn has_unknown_status(&self) -> bool {
        self.status.is_some() && self.status_kind().is_none()
    }
}
