//! Estado de un registro de perawatan
//!
//! El status se persiste como texto; cualquier valor desconocido que llegue
//! desde la base de datos se muestra con el badge de "pending" en lugar de
//! producir un error de decodificación.

use serde::{Deserialize, Serialize};

/// Estados válidos de una perawatan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceStatus {
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

/// Badge de display: etiqueta en indonesio + categoría de estilo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusBadge {
    pub label: &'static str,
    pub style: &'static str,
}

impl MaintenanceStatus {
    pub const ALL: [MaintenanceStatus; 4] = [
        MaintenanceStatus::Pending,
        MaintenanceStatus::InProgress,
        MaintenanceStatus::Completed,
        MaintenanceStatus::Cancelled,
    ];

    /// Valores aceptados en los formularios
    pub const ALLOWED_VALUES: [&'static str; 4] =
        ["pending", "in_progress", "completed", "cancelled"];

    pub fn as_str(&self) -> &'static str {
        match self {
            MaintenanceStatus::Pending => "pending",
            MaintenanceStatus::InProgress => "in_progress",
            MaintenanceStatus::Completed => "completed",
            MaintenanceStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(MaintenanceStatus::Pending),
            "in_progress" => Some(MaintenanceStatus::InProgress),
            "completed" => Some(MaintenanceStatus::Completed),
            "cancelled" => Some(MaintenanceStatus::Cancelled),
            _ => None,
        }
    }

    /// Tabla fija de badges por estado
    pub fn badge(&self) -> StatusBadge {
        match self {
            MaintenanceStatus::Pending => StatusBadge {
                label: "Menunggu",
                style: "yellow",
            },
            MaintenanceStatus::InProgress => StatusBadge {
                label: "Sedang Proses",
                style: "blue",
            },
            MaintenanceStatus::Completed => StatusBadge {
                label: "Selesai",
                style: "green",
            },
            MaintenanceStatus::Cancelled => StatusBadge {
                label: "Dibatalkan",
                style: "red",
            },
        }
    }

    /// Badge para un valor almacenado: los valores no reconocidos caen al
    /// badge de "pending" (política explícita, no un accidente)
    pub fn badge_for(stored: &str) -> StatusBadge {
        Self::parse(stored)
            .unwrap_or(MaintenanceStatus::Pending)
            .badge()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_known_values() {
        for status in MaintenanceStatus::ALL {
            assert_eq!(MaintenanceStatus::parse(status.as_str()), Some(status));
        }
    }

    #[test]
    fn test_badge_labels() {
        assert_eq!(MaintenanceStatus::Pending.badge().label, "Menunggu");
        assert_eq!(MaintenanceStatus::InProgress.badge().label, "Sedang Proses");
        assert_eq!(MaintenanceStatus::Completed.badge().label, "Selesai");
        assert_eq!(MaintenanceStatus::Cancelled.badge().label, "Dibatalkan");
    }

    #[test]
    fn test_unknown_status_falls_back_to_pending() {
        let badge = MaintenanceStatus::badge_for("scheduled");
        assert_eq!(badge.label, "Menunggu");
        assert_eq!(badge.style, "yellow");

        let badge = MaintenanceStatus::badge_for("");
        assert_eq!(badge.label, "Menunggu");
    }

    #[test]
    fn test_known_stored_value_keeps_its_badge() {
        assert_eq!(MaintenanceStatus::badge_for("completed").style, "green");
        assert_eq!(MaintenanceStatus::badge_for("cancelled").style, "red");
    }
}
