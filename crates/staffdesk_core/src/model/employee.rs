//! Employee record model for the editable collection.
//!
//! # Responsibility
//! - Define the record shape, its add/patch inputs and match helpers.
//! - Own the fixed seed dataset used when storage is empty or corrupt.
//!
//! # Invariants
//! - `id` is unique within one collection and assigned by the store.
//! - Patch application never changes `id` or collection position.

use serde::{Deserialize, Serialize};

/// One row of the editable employee collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Store-assigned integer identity, dense but not monotonic: after the
    /// highest id is deleted, the next allocation reuses that value.
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: String,
    /// Calendar date in `YYYY-MM-DD` form; treated as opaque text by core.
    pub join_date: String,
}

impl Employee {
    /// Applies a shallow patch in place, preserving `id`.
    pub fn apply_patch(&mut self, patch: &EmployeePatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(email) = &patch.email {
            self.email = email.clone();
        }
        if let Some(role) = &patch.role {
            self.role = role.clone();
        }
        if let Some(join_date) = &patch.join_date {
            self.join_date = join_date.clone();
        }
    }

    /// Case-insensitive substring match over name, email and role.
    ///
    /// `needle` must already be lowercased by the caller.
    pub fn matches_term(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.email.to_lowercase().contains(needle)
            || self.role.to_lowercase().contains(needle)
    }

    /// Returns the fixed twelve-entry dataset used to seed empty storage.
    pub fn seed_dataset() -> Vec<Self> {
        let rows: [(&str, &str, &str, &str); 12] = [
            ("Budi Santoso", "budi@company.com", "Frontend Developer", "2024-01-15"),
            ("Siti Rahayu", "siti@company.com", "Backend Developer", "2024-02-20"),
            ("Agus Pratama", "agus@company.com", "UI/UX Designer", "2024-03-10"),
            ("Dewi Lestari", "dewi@company.com", "Project Manager", "2023-11-05"),
            ("Rudi Hermawan", "rudi@company.com", "DevOps Engineer", "2024-04-01"),
            ("Maya Sari", "maya@company.com", "QA Engineer", "2024-05-15"),
            ("Andi Wijaya", "andi@company.com", "Mobile Developer", "2024-06-20"),
            ("Rina Kusuma", "rina@company.com", "Data Analyst", "2024-07-10"),
            ("Hendra Gunawan", "hendra@company.com", "System Analyst", "2024-08-01"),
            ("Putri Handayani", "putri@company.com", "HR Manager", "2023-09-15"),
            ("Joko Susilo", "joko@company.com", "IT Support", "2024-09-20"),
            ("Lina Wulandari", "lina@company.com", "Content Writer", "2024-10-05"),
        ];

        rows.iter()
            .enumerate()
            .map(|(index, (name, email, role, join_date))| Self {
                id: index as i64 + 1,
                name: (*name).to_string(),
                email: (*email).to_string(),
                role: (*role).to_string(),
                join_date: (*join_date).to_string(),
            })
            .collect()
    }
}

/// Input for creating a record; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeDraft {
    pub name: String,
    pub email: String,
    pub role: String,
    pub join_date: String,
}

impl EmployeeDraft {
    /// Builds the stored record once the store has allocated an id.
    pub fn into_record(self, id: i64) -> Employee {
        Employee {
            id,
            name: self.name,
            email: self.email,
            role: self.role,
            join_date: self.join_date,
        }
    }
}

/// Partial record update. Fields left `None` are untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeePatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub join_date: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::{Employee, EmployeeDraft, EmployeePatch};

    #[test]
    fn seed_dataset_has_twelve_rows_with_dense_ids() {
        let seed = Employee::seed_dataset();
        assert_eq!(seed.len(), 12);
        for (index, record) in seed.iter().enumerate() {
            assert_eq!(record.id, index as i64 + 1);
        }
    }

    #[test]
    fn matches_term_covers_name_email_and_role() {
        let record = EmployeeDraft {
            name: "Grace Hopper".to_string(),
            email: "grace@company.com".to_string(),
            role: "Compiler Engineer".to_string(),
            join_date: "2024-01-01".to_string(),
        }
        .into_record(1);

        assert!(record.matches_term("hopper"));
        assert!(record.matches_term("grace@"));
        assert!(record.matches_term("compiler"));
        assert!(!record.matches_term("designer"));
    }

    #[test]
    fn apply_patch_keeps_unpatched_fields_and_id() {
        let mut record = Employee::seed_dataset().remove(0);
        record.apply_patch(&EmployeePatch {
            role: Some("Staff Engineer".to_string()),
            ..EmployeePatch::default()
        });

        assert_eq!(record.id, 1);
        assert_eq!(record.name, "Budi Santoso");
        assert_eq!(record.role, "Staff Engineer");
    }
}
