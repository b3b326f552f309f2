//! Spreadsheet import and export.
//!
//! Column headers are in Spanish because the files are exchanged with the
//! residents' association, which keeps its records in Spanish.

use std::collections::HashMap;

use csv::{ReaderBuilder, WriterBuilder};

use crate::errors::{CourtError, CourtResult};
use crate::models::reservation::ReservationDetail;
use crate::models::user::{Role, User, UserStatus};
use crate::validation::{normalize_email, validate_email};

pub const RESERVATION_HEADERS: [&str; 9] = [
    "ID", "Usuario", "Email", "Manzana", "Villa", "Cancha", "Fecha", "Horario", "Estado",
];

pub const USER_EXPORT_HEADERS: [&str; 7] = [
    "Nombre",
    "Email",
    "Rol",
    "Estado",
    "Manzana",
    "Villa",
    "FechaRegistro",
];

pub const USER_IMPORT_HEADERS: [&str; 7] = [
    "Nombre", "Email", "Password", "Rol", "Estado", "Manzana", "Villa",
];

/// Password given to imported accounts that arrive without one.
pub const DEFAULT_IMPORT_PASSWORD: &str = "password123";

fn write_rows<const N: usize>(headers: [&str; N], rows: Vec<[String; N]>) -> CourtResult<String> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(Vec::new());
    wtr.write_record(headers)
        .map_err(|e| CourtError::Internal(Box::new(e)))?;
    for row in rows {
        wtr.write_record(&row)
            .map_err(|e| CourtError::Internal(Box::new(e)))?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| CourtError::Internal(Box::new(e.into_error())))?;
    String::from_utf8(bytes).map_err(|e| CourtError::Internal(Box::new(e)))
}

pub fn reservations_to_csv(rows: &[ReservationDetail]) -> CourtResult<String> {
    let records = rows
        .iter()
        .map(|row| {
            [
                row.reservation.id.to_string(),
                row.user_name.clone(),
                row.user_email.clone(),
                row.manzana.clone(),
                row.villa.clone(),
                row.court_name.clone(),
                row.reservation.date.format("%Y-%m-%d").to_string(),
                row.slot_label.clone(),
                row.reservation.status.display_name().to_string(),
            ]
        })
        .collect();
    write_rows(RESERVATION_HEADERS, records)
}

/// Password hashes are never exported.
pub fn users_to_csv(users: &[User]) -> CourtResult<String> {
    let records = users
        .iter()
        .map(|user| {
            [
                user.name.clone(),
                user.email.clone(),
                user.role.as_str().to_string(),
                user.status.display_name().to_string(),
                user.household.manzana.clone(),
                user.household.villa.clone(),
                user.created_at.format("%Y-%m-%d").to_string(),
            ]
        })
        .collect();
    write_rows(USER_EXPORT_HEADERS, records)
}

/// One row of an imported user sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedUser {
    pub name: String,
    pub email: String,
    /// `None` when the cell was empty.
    pub password: Option<String>,
    pub role: Role,
    pub status: UserStatus,
    pub manzana: String,
    pub villa: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedImport {
    pub users: Vec<ImportedUser>,
    pub skipped: usize,
}

/// Parses a user sheet. Cells are looked up by header name, so columns may
/// come in any order and extra columns are ignored. `Password` is optional;
/// every other import header is required. Rows whose cell count differs from
/// the header, with no name, or with an invalid email are skipped.
pub fn parse_users_csv(input: &str) -> CourtResult<ParsedImport> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| CourtError::Validation(format!("Could not read the CSV header: {}", e)))?
        .clone();
    let column = |name: &str| headers.iter().position(|h| h.eq_ignore_ascii_case(name));
    let required = |name: &str| {
        column(name).ok_or_else(|| {
            CourtError::Validation(format!("The CSV file has no '{}' column", name))
        })
    };

    let name_col = required("Nombre")?;
    let email_col = required("Email")?;
    let role_col = required("Rol")?;
    let status_col = required("Estado")?;
    let manzana_col = required("Manzana")?;
    let villa_col = required("Villa")?;
    let password_col = column("Password");

    let mut parsed = ParsedImport::default();
    for record in reader.records() {
        let record = record.map_err(|e| {
            CourtError::Validation(format!("Could not read the CSV file: {}", e))
        })?;
        if record.len() != headers.len() {
            parsed.skipped += 1;
            continue;
        }

        let field = |i: usize| record.get(i).unwrap_or_default().to_string();
        let (name, email) = (field(name_col), field(email_col));
        if name.is_empty() || validate_email(&email).is_err() {
            parsed.skipped += 1;
            continue;
        }

        let password = password_col.map(field).filter(|p| !p.is_empty());
        let role = if field(role_col).eq_ignore_ascii_case("admin") {
            Role::Admin
        } else {
            Role::User
        };
        let status = match field(status_col).to_lowercase().as_str() {
            "bloqueado" => UserStatus::Blocked,
            "pendiente" => UserStatus::Pending,
            _ => UserStatus::Approved,
        };

        parsed.users.push(ImportedUser {
            name,
            email: normalize_email(&email),
            password,
            role,
            status,
            manzana: field(manzana_col),
            villa: field(villa_col),
        });
    }

    Ok(parsed)
}

/// Keeps an import from locking the administration out.
///
/// The row for `actor` keeps the actor's current role and status. The
/// import is refused when, applied over `existing`, it would leave no
/// approved administrator.
pub fn protect_administrators(
    rows: &mut [ImportedUser],
    actor: &User,
    existing: &[User],
) -> CourtResult<()> {
    let actor_email = normalize_email(&actor.email);
    for row in rows.iter_mut().filter(|row| row.email == actor_email) {
        row.role = actor.role;
        row.status = actor.status;
    }

    let mut accounts: HashMap<String, (Role, UserStatus)> = existing
        .iter()
        .map(|user| (normalize_email(&user.email), (user.role, user.status)))
        .collect();
    for row in rows.iter() {
        accounts.insert(row.email.clone(), (row.role, row.status));
    }

    let admins = accounts
        .values()
        .filter(|(role, status)| *role == Role::Admin && *status == UserStatus::Approved)
        .count();
    if admins == 0 {
        return Err(CourtError::Validation(
            "The import would leave no approved administrator".to_string(),
        ));
    }
    Ok(())
}
