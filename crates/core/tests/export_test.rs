use chrono::{NaiveDate, TimeZone, Utc};
use courtside_core::courts::Court;
use courtside_core::errors::CourtError;
use courtside_core::export::{
    parse_users_csv, protect_administrators, reservations_to_csv, users_to_csv, ImportedUser,
};
use courtside_core::models::reservation::{Reservation, ReservationDetail, ReservationStatus};
use courtside_core::models::user::{Household, Role, User, UserStatus};
use pretty_assertions::assert_eq;
use uuid::Uuid;

#[test]
fn test_reservation_export_quotes_fields() {
    let id = Uuid::new_v4();
    let reservation = Reservation {
        id,
        user_id: Uuid::new_v4(),
        court: Court::Futbol,
        date: NaiveDate::from_ymd_opt(2026, 10, 14).unwrap(),
        start: "18:00".parse().unwrap(),
        end: "20:00".parse().unwrap(),
        status: ReservationStatus::Pending,
        created_by_admin: false,
        has_payment_proof: true,
        created_at: Utc::now(),
    };
    let row = ReservationDetail {
        slot_label: reservation.slot_label(),
        reservation,
        user_name: "Pérez, Ana".to_string(),
        user_email: "ana@example.com".to_string(),
        manzana: "3".to_string(),
        villa: "Casa \"B\"".to_string(),
        court_name: Court::Futbol.display_name().to_string(),
    };

    let csv = reservations_to_csv(&[row]).unwrap();
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(lines[0], "ID,Usuario,Email,Manzana,Villa,Cancha,Fecha,Horario,Estado");
    assert_eq!(
        lines[1],
        format!(
            "{},\"Pérez, Ana\",ana@example.com,3,\"Casa \"\"B\"\"\",Fútbol,2026-10-14,18:00 - 20:00,Pendiente",
            id
        )
    );
}

#[test]
fn test_user_export_omits_passwords() {
    let user = User {
        id: Uuid::new_v4(),
        name: "Luis".to_string(),
        email: "luis@example.com".to_string(),
        password_hash: "$argon2id$secret".to_string(),
        role: Role::Admin,
        status: UserStatus::Blocked,
        household: Household::new("1", "2"),
        created_at: Utc.with_ymd_and_hms(2026, 1, 5, 12, 0, 0).unwrap(),
    };

    let csv = users_to_csv(&[user]).unwrap();

    assert_eq!(
        csv,
        "Nombre,Email,Rol,Estado,Manzana,Villa,FechaRegistro\nLuis,luis@example.com,admin,Bloqueado,1,2,2026-01-05\n"
    );
    assert!(!csv.contains("argon2"));
}

#[test]
fn test_parse_users_csv() {
    let input = "Nombre,Email,Password,Rol,Estado,Manzana,Villa\n\
                 Ana,ANA@example.com,clave99,user,Activo,3,12\n\
                 Beto,beto@example.com,,admin,Bloqueado,4,1\n\
                 solo,tres,columnas\n\
                 ,nadie@example.com,x,user,Activo,1,1\n\
                 Caro,no-es-email,x,user,Activo,1,1\n";

    let parsed = parse_users_csv(input).unwrap();

    assert_eq!(parsed.skipped, 3);
    assert_eq!(parsed.users.len(), 2);

    let ana = &parsed.users[0];
    assert_eq!(ana.email, "ana@example.com");
    assert_eq!(ana.password.as_deref(), Some("clave99"));
    assert_eq!((ana.role, ana.status), (Role::User, UserStatus::Approved));

    let beto = &parsed.users[1];
    assert_eq!(beto.password, None);
    assert_eq!((beto.role, beto.status), (Role::Admin, UserStatus::Blocked));
    assert_eq!((beto.manzana.as_str(), beto.villa.as_str()), ("4", "1"));
}

fn member(email: &str, role: Role, status: UserStatus) -> User {
    User {
        id: Uuid::new_v4(),
        name: email.split('@').next().unwrap_or_default().to_string(),
        email: email.to_string(),
        password_hash: "$argon2id$hash".to_string(),
        role,
        status,
        household: Household::new("12", "7"),
        created_at: Utc.with_ymd_and_hms(2026, 10, 16, 9, 0, 0).unwrap(),
    }
}

fn imported(email: &str, role: Role, status: UserStatus) -> ImportedUser {
    ImportedUser {
        name: "Importado".to_string(),
        email: email.to_string(),
        password: None,
        role,
        status,
        manzana: "1".to_string(),
        villa: "1".to_string(),
    }
}

#[test]
fn test_exported_sheet_imports_back_unchanged() {
    let admin = member("admin@example.com", Role::Admin, UserStatus::Approved);
    let blocked = member("vecino@example.com", Role::User, UserStatus::Blocked);

    let parsed = parse_users_csv(&users_to_csv(&[admin, blocked]).unwrap()).unwrap();

    assert_eq!(parsed.skipped, 0);
    assert_eq!(
        parsed.users,
        vec![
            ImportedUser {
                name: "admin".to_string(),
                email: "admin@example.com".to_string(),
                password: None,
                role: Role::Admin,
                status: UserStatus::Approved,
                manzana: "12".to_string(),
                villa: "7".to_string(),
            },
            ImportedUser {
                name: "vecino".to_string(),
                email: "vecino@example.com".to_string(),
                password: None,
                role: Role::User,
                status: UserStatus::Blocked,
                manzana: "12".to_string(),
                villa: "7".to_string(),
            },
        ]
    );
}

#[test]
fn test_columns_are_matched_by_header_name() {
    let input = "Villa,Manzana,Estado,Rol,Email,Nombre,Password\n\
                 9,4,Activo,admin,eva@example.com,Eva,secreta1\n";

    let parsed = parse_users_csv(input).unwrap();

    let eva = &parsed.users[0];
    assert_eq!(eva.name, "Eva");
    assert_eq!(eva.role, Role::Admin);
    assert_eq!(eva.password.as_deref(), Some("secreta1"));
    assert_eq!((eva.manzana.as_str(), eva.villa.as_str()), ("4", "9"));
}

#[test]
fn test_missing_required_header_is_rejected() {
    let input = "Nombre,Email,Password,Rol,Manzana,Villa\n\
                 Ana,ana@example.com,clave99,user,3,12\n";

    let result = parse_users_csv(input);

    assert!(matches!(result, Err(CourtError::Validation(msg)) if msg.contains("Estado")));
}

#[test]
fn test_import_keeps_acting_admin_role_and_status() {
    let actor = member("jefa@example.com", Role::Admin, UserStatus::Approved);
    let mut rows = vec![
        imported("jefa@example.com", Role::User, UserStatus::Blocked),
        imported("otro@example.com", Role::User, UserStatus::Approved),
    ];

    protect_administrators(&mut rows, &actor, &[actor.clone()]).unwrap();

    assert_eq!((rows[0].role, rows[0].status), (Role::Admin, UserStatus::Approved));
    assert_eq!((rows[1].role, rows[1].status), (Role::User, UserStatus::Approved));
}

#[test]
fn test_import_may_demote_other_admins_while_one_remains() {
    let actor = member("jefa@example.com", Role::Admin, UserStatus::Approved);
    let other = member("segundo@example.com", Role::Admin, UserStatus::Approved);
    let mut rows = vec![imported("segundo@example.com", Role::User, UserStatus::Approved)];

    protect_administrators(&mut rows, &actor, &[actor.clone(), other]).unwrap();

    assert_eq!(rows[0].role, Role::User);
}

#[test]
fn test_import_leaving_no_approved_admin_is_refused() {
    // The actor is not an approved admin, so only the sheet can keep one
    let actor = member("ex@example.com", Role::User, UserStatus::Approved);
    let last = member("ultimo@example.com", Role::Admin, UserStatus::Approved);
    let mut rows = vec![imported("ultimo@example.com", Role::Admin, UserStatus::Blocked)];

    let result = protect_administrators(&mut rows, &actor, &[actor.clone(), last]);

    assert!(matches!(result, Err(CourtError::Validation(_))));
}
