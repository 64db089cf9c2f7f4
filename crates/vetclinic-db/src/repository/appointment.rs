//! # Appointment Book
//!
//! Database operations for appointments and their billable service lines.
//!
//! ## Storage Shape
//! Appointments are denormalized: one row per service line, all rows sharing
//! the generated `appointment_id` and carrying identical header fields
//! (patient, owner, date, notes, status, total). Listing aggregates back to
//! one row per appointment at read time; deletion removes every row of the
//! id.
//!
//! ## Status Lifecycle
//! Status changes go through [`AppointmentStatus::can_transition_to`]; an
//! illegal move (e.g. CANCELLED → COMPLETED) is rejected with a typed error
//! and nothing is written.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use vetclinic_core::{
    Appointment, AppointmentLine, AppointmentStatus, AppointmentSummary, CoreError, ServiceLine,
    ValidationError,
};

/// Per-line column list with centavo aliases.
const LINE_COLUMNS: &str = "appointment_id, patient_name, owner_name, animal_type, service, \
     qty, price AS price_centavos, subtotal AS subtotal_centavos, \
     date, notes, status, total_amount AS total_centavos";

/// Manager for appointment rows.
#[derive(Debug, Clone)]
pub struct AppointmentBook {
    pool: SqlitePool,
}

impl AppointmentBook {
    /// Creates a new AppointmentBook.
    pub fn new(pool: SqlitePool) -> Self {
        AppointmentBook { pool }
    }

    /// Persists an appointment: one row per service line under the shared
    /// appointment id, inside one transaction.
    ///
    /// Rejects appointments with no service lines, and appointments whose
    /// stated total does not equal the sum of the line subtotals.
    pub async fn record(&self, appointment: &Appointment) -> DbResult<()> {
        if appointment.services.is_empty() {
            return Err(DbError::Domain(CoreError::Validation(
                ValidationError::Required {
                    field: "services".to_string(),
                },
            )));
        }

        let computed = appointment.computed_total_centavos();
        if computed != appointment.total_centavos {
            return Err(DbError::Domain(CoreError::Validation(
                ValidationError::TotalMismatch {
                    stated: appointment.total_centavos,
                    computed,
                },
            )));
        }

        debug!(
            appointment_id = %appointment.appointment_id,
            services = appointment.services.len(),
            total = appointment.total_centavos,
            "Recording appointment"
        );

        let mut tx = self.pool.begin().await?;

        for line in &appointment.services {
            sqlx::query(
                r#"
                INSERT INTO appointments
                    (appointment_id, patient_name, owner_name, animal_type, service,
                     qty, price, subtotal, date, notes, status, total_amount)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
                "#,
            )
            .bind(&appointment.appointment_id)
            .bind(&appointment.patient_name)
            .bind(&appointment.owner_name)
            .bind(&appointment.animal_type)
            .bind(&line.service)
            .bind(line.quantity)
            .bind(line.price_centavos)
            .bind(line.subtotal_centavos)
            .bind(appointment.date)
            .bind(&appointment.notes)
            .bind(appointment.status)
            .bind(appointment.total_centavos)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Returns one aggregated summary per distinct appointment id, most
    /// recent first.
    pub async fn list_all(&self) -> DbResult<Vec<AppointmentSummary>> {
        let summaries = sqlx::query_as::<_, AppointmentSummary>(
            r#"
            SELECT appointment_id, patient_name, owner_name, animal_type,
                   date, notes, status, total_amount AS total_centavos
            FROM appointments
            GROUP BY appointment_id
            ORDER BY date DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(summaries)
    }

    /// Returns stored line rows, filtered by a date prefix (e.g.
    /// `2026-08-06`) and/or an appointment-id substring. Empty filters match
    /// everything. Most recent first.
    pub async fn history(
        &self,
        date_filter: &str,
        id_filter: &str,
    ) -> DbResult<Vec<AppointmentLine>> {
        // Empty filters degrade to match-all patterns so one statement
        // serves every filter combination.
        let date_pattern = if date_filter.is_empty() {
            "%".to_string()
        } else {
            format!("{date_filter}%")
        };
        let id_pattern = format!("%{id_filter}%");

        let lines = sqlx::query_as::<_, AppointmentLine>(&format!(
            "SELECT {LINE_COLUMNS} FROM appointments \
             WHERE date LIKE ?1 AND appointment_id LIKE ?2 \
             ORDER BY date DESC"
        ))
        .bind(&date_pattern)
        .bind(&id_pattern)
        .fetch_all(&self.pool)
        .await?;

        Ok(lines)
    }

    /// Reassembles a full appointment, service lines included.
    pub async fn get(&self, appointment_id: &str) -> DbResult<Option<Appointment>> {
        let rows = sqlx::query_as::<_, AppointmentLine>(&format!(
            "SELECT {LINE_COLUMNS} FROM appointments \
             WHERE appointment_id = ?1 \
             ORDER BY id"
        ))
        .bind(appointment_id)
        .fetch_all(&self.pool)
        .await?;

        let Some(first) = rows.first() else {
            return Ok(None);
        };

        let mut appointment = Appointment::new(
            first.appointment_id.clone(),
            first.patient_name.clone(),
            first.owner_name.clone(),
            first.animal_type.clone(),
            first.notes.clone(),
            first.date,
        );
        appointment.status = first.status;
        appointment.services = rows
            .iter()
            .map(|r| ServiceLine {
                service: r.service.clone(),
                quantity: r.qty,
                price_centavos: r.price_centavos,
                subtotal_centavos: r.subtotal_centavos,
            })
            .collect();
        appointment.total_centavos = first.total_centavos;

        Ok(Some(appointment))
    }

    /// Changes an appointment's status, enforcing the transition allow-list.
    ///
    /// All line rows of the appointment are updated together. Illegal
    /// transitions are rejected with `InvalidTransition`; unknown ids with
    /// `NotFound`.
    pub async fn update_status(
        &self,
        appointment_id: &str,
        new_status: AppointmentStatus,
    ) -> DbResult<()> {
        let mut tx = self.pool.begin().await?;

        let current: Option<AppointmentStatus> = sqlx::query_scalar(
            "SELECT status FROM appointments WHERE appointment_id = ?1 LIMIT 1",
        )
        .bind(appointment_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(current) = current else {
            return Err(DbError::not_found("Appointment", appointment_id));
        };

        if !current.can_transition_to(new_status) {
            return Err(DbError::Domain(CoreError::InvalidTransition {
                from: current,
                to: new_status,
            }));
        }

        debug!(
            appointment_id,
            from = %current,
            to = %new_status,
            "Updating appointment status"
        );

        sqlx::query("UPDATE appointments SET status = ?2 WHERE appointment_id = ?1")
            .bind(appointment_id)
            .bind(new_status)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Removes all rows of the appointment.
    pub async fn delete(&self, appointment_id: &str) -> DbResult<()> {
        debug!(appointment_id, "Deleting appointment");

        let result = sqlx::query("DELETE FROM appointments WHERE appointment_id = ?1")
            .bind(appointment_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Appointment", appointment_id));
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use chrono::{Duration, Utc};
    use vetclinic_core::Money;

    fn checkup_appointment(id: &str, patient: &str) -> Appointment {
        let mut apt = Appointment::new(id, patient, "Ana Cruz", "Dog", "", Utc::now());
        apt.add_service("Consultation", 1, Money::from_centavos(50_000));
        apt.add_service("Vaccination", 1, Money::from_centavos(80_000));
        apt
    }

    #[tokio::test]
    async fn test_record_persists_one_row_per_service() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let book = db.appointments();

        let apt = checkup_appointment("APT1", "Rex");
        book.record(&apt).await.unwrap();

        let lines = book.history("", "APT1").await.unwrap();
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|l| l.appointment_id == "APT1"));
        assert!(lines.iter().all(|l| l.total_centavos == 130_000));

        let summaries = book.list_all().await.unwrap();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].total().centavos(), 130_000);
        assert_eq!(summaries[0].status, AppointmentStatus::Scheduled);
    }

    #[tokio::test]
    async fn test_record_rejects_empty_services() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let apt = Appointment::new("APT1", "Rex", "Ana", "Dog", "", Utc::now());

        let err = db.appointments().record(&apt).await.unwrap_err();
        assert!(matches!(
            err,
            DbError::Domain(CoreError::Validation(ValidationError::Required { .. }))
        ));
    }

    #[tokio::test]
    async fn test_record_rejects_total_mismatch() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let mut apt = checkup_appointment("APT1", "Rex");
        apt.total_centavos = 999;

        let err = db.appointments().record(&apt).await.unwrap_err();
        assert!(matches!(
            err,
            DbError::Domain(CoreError::Validation(ValidationError::TotalMismatch { .. }))
        ));

        // Nothing persisted.
        assert!(db.appointments().list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_all_aggregates_and_orders_newest_first() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let book = db.appointments();

        let mut older = checkup_appointment("APT-OLD", "Rex");
        older.date = Utc::now() - Duration::days(2);
        book.record(&older).await.unwrap();
        book.record(&checkup_appointment("APT-NEW", "Mingming")).await.unwrap();

        let summaries = book.list_all().await.unwrap();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].appointment_id, "APT-NEW");
        assert_eq!(summaries[1].appointment_id, "APT-OLD");
    }

    #[tokio::test]
    async fn test_history_filters() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let book = db.appointments();

        let apt = checkup_appointment("APT-A", "Rex");
        book.record(&apt).await.unwrap();
        book.record(&checkup_appointment("APT-B", "Mingming")).await.unwrap();

        // Id substring filter.
        let only_a = book.history("", "-A").await.unwrap();
        assert_eq!(only_a.len(), 2);
        assert!(only_a.iter().all(|l| l.appointment_id == "APT-A"));

        // Date prefix filter (today's date matches everything recorded now).
        let today = apt.date.format("%Y-%m-%d").to_string();
        assert_eq!(book.history(&today, "").await.unwrap().len(), 4);
        assert!(book.history("1999-01-01", "").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_reassembles_appointment() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let book = db.appointments();
        book.record(&checkup_appointment("APT1", "Rex")).await.unwrap();

        let apt = book.get("APT1").await.unwrap().unwrap();
        assert_eq!(apt.patient_name, "Rex");
        assert_eq!(apt.services.len(), 2);
        assert_eq!(apt.total_centavos, 130_000);
        assert_eq!(apt.computed_total_centavos(), 130_000);

        assert!(book.get("APT-MISSING").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_status_transitions_enforced() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let book = db.appointments();
        book.record(&checkup_appointment("APT1", "Rex")).await.unwrap();

        // Scheduled → InProgress → Completed is the happy path.
        book.update_status("APT1", AppointmentStatus::InProgress).await.unwrap();
        book.update_status("APT1", AppointmentStatus::Completed).await.unwrap();

        let summary = &book.list_all().await.unwrap()[0];
        assert_eq!(summary.status, AppointmentStatus::Completed);

        // Completed is terminal.
        let err = book
            .update_status("APT1", AppointmentStatus::Cancelled)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DbError::Domain(CoreError::InvalidTransition { .. })
        ));
    }

    #[tokio::test]
    async fn test_cancelled_cannot_complete() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let book = db.appointments();
        book.record(&checkup_appointment("APT1", "Rex")).await.unwrap();

        book.update_status("APT1", AppointmentStatus::Cancelled).await.unwrap();

        let err = book
            .update_status("APT1", AppointmentStatus::Completed)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DbError::Domain(CoreError::InvalidTransition { .. })
        ));

        // Status unchanged.
        let apt = book.get("APT1").await.unwrap().unwrap();
        assert_eq!(apt.status, AppointmentStatus::Cancelled);
    }

    #[tokio::test]
    async fn test_update_status_missing_appointment() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let err = db
            .appointments()
            .update_status("APT-GHOST", AppointmentStatus::InProgress)
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_removes_all_rows() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let book = db.appointments();
        book.record(&checkup_appointment("APT1", "Rex")).await.unwrap();

        book.delete("APT1").await.unwrap();
        assert!(book.history("", "APT1").await.unwrap().is_empty());
        assert!(matches!(
            book.delete("APT1").await,
            Err(DbError::NotFound { .. })
        ));
    }
}
