//! Avisos de cumpleaños
//!
//! Al navegar, un superusuario recibe una notificación por cada usuario que
//! cumple años hoy. El mismo texto no se repite para el mismo destinatario
//! dentro del mismo año calendario.

use chrono::{DateTime, Datelike, Local, NaiveDate, Utc};
use sqlx::SqlitePool;

use crate::models::user::User;
use crate::repositories::notification_repository::NotificationRepository;
use crate::repositories::user_repository::UserRepository;
use crate::utils::errors::AppError;

/// Coincidencia exacta de mes y día
pub fn is_birthday(birth_date: NaiveDate, today: NaiveDate) -> bool {
    birth_date.month() == today.month() && birth_date.day() == today.day()
}

pub fn birthday_message(user: &User) -> String {
    format!("🎂 ¡Hoy es el cumpleaños de {}!", user.display_name())
}

/// El año se evalúa en hora local, igual que "hoy"
pub fn notified_in_year(created: &[DateTime<Utc>], year: i32) -> bool {
    created
        .iter()
        .any(|d| d.with_timezone(&Local).year() == year)
}

pub struct BirthdayService {
    pool: SqlitePool,
    users: UserRepository,
}

impl BirthdayService {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            pool,
        }
    }

    /// Crea los avisos pendientes para `recipient`; devuelve cuántos se crearon
    pub async fn check_and_notify(&self, recipient: &User, today: NaiveDate) -> Result<usize, AppError> {
        let celebrants: Vec<User> = self
            .users
            .list_with_birth_date()
            .await?
            .into_iter()
            .filter(|u| u.fecha_nacimiento.map_or(false, |d| is_birthday(d, today)))
            .collect();

        if celebrants.is_empty() {
            return Ok(0);
        }

        let mut tx = self.pool.begin().await?;
        let mut created = 0;

        for celebrant in &celebrants {
            let text = birthday_message(celebrant);
            let previous = NotificationRepository::created_dates(&mut tx, recipient.id, &text).await?;

            if notified_in_year(&previous, today.year()) {
                continue;
            }

            NotificationRepository::insert(&mut tx, recipient.id, &text).await?;
            created += 1;
        }

        tx.commit().await?;

        if created > 0 {
            tracing::info!(recipient = recipient.id, created, "Avisos de cumpleaños creados");
        }

        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::{Role, UserType};
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_is_birthday_ignores_year() {
        assert!(is_birthday(date(1990, 7, 14), date(2024, 7, 14)));
        assert!(!is_birthday(date(1990, 7, 14), date(2024, 7, 15)));
        assert!(!is_birthday(date(1990, 8, 14), date(2024, 7, 14)));
        // Sin ajuste para el 29 de febrero
        assert!(!is_birthday(date(2000, 2, 29), date(2023, 2, 28)));
    }

    #[test]
    fn test_notified_in_year() {
        let mid_2023 = Utc.with_ymd_and_hms(2023, 6, 15, 12, 0, 0).unwrap();
        let mid_2024 = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();

        assert!(!notified_in_year(&[], 2024));
        assert!(!notified_in_year(&[mid_2023], 2024));
        assert!(notified_in_year(&[mid_2023, mid_2024], 2024));
    }

    #[test]
    fn test_birthday_message_uses_display_name() {
        let mut user = User {
            id: 3,
            email: "acme@example.com".into(),
            password_hash: String::new(),
            role: Role::Regular,
            user_type: UserType::Empresa,
            avatar: None,
            nombre: None,
            primer_apellido: None,
            segundo_apellido: None,
            nombre_empresa: Some("Acme".into()),
            encargado: None,
            contacto: None,
            telefono_fijo: None,
            direccion: None,
            otros_detalles: None,
            telefono: None,
            movil: None,
            whatsapp: None,
            fecha_nacimiento: None,
            created_at: Utc::now(),
        };
        assert_eq!(birthday_message(&user), "🎂 ¡Hoy es el cumpleaños de Acme!");

        user.nombre_empresa = None;
        assert_eq!(
            birthday_message(&user),
            "🎂 ¡Hoy es el cumpleaños de acme@example.com!"
        );
    }
}
