use chrono::Utc;
use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::{info, instrument};

use shared_models::auth::Role;
use shared_models::error::AppError;
use shared_utils::password::PasswordService;

use crate::pool::begin_immediate;

pub const SEED_DEPARTMENTS: &[(&str, &str)] = &[
    ("Cardiology", "Heart-related issues."),
    ("Neurology", "Nervous system disorders."),
    ("Orthopaedics", "Musculoskeletal system."),
];

pub const SEED_TREATMENTS: &[(&str, &str)] = &[
    ("Consultation", "General check-up."),
    ("EKG", "Electrocardiogram."),
    ("MRI Scan", "Magnetic Resonance Imaging."),
    ("Knee Surgery", "Total Knee Replacement."),
];

struct SeedAccount {
    first_name: &'static str,
    last_name: &'static str,
    username: &'static str,
    email: &'static str,
    password: &'static str,
    role: Role,
    department: Option<&'static str>,
}

const SEED_ADMIN: SeedAccount = SeedAccount {
    first_name: "System",
    last_name: "admin",
    username: "admin",
    email: "11d@gmail.com",
    password: "admin",
    role: Role::Admin,
    department: None,
};

const SEED_DOCTOR: SeedAccount = SeedAccount {
    first_name: "doctor",
    last_name: "doctor",
    username: "doctor",
    email: "doc@gmail.com",
    password: "doctor",
    role: Role::Doctor,
    department: Some("Cardiology"),
};

/// What a seeding run actually inserted.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SeedReport {
    pub departments: usize,
    pub treatments: usize,
    pub accounts: usize,
}

/// Inserts reference data and the starter accounts. Each group is only
/// written when absent, so running this on every start is safe.
#[instrument(skip(pool))]
pub async fn seed_reference_data(pool: &SqlitePool) -> Result<SeedReport, AppError> {
    let mut tx = begin_immediate(pool).await?;
    let mut report = SeedReport::default();

    let (department_count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM departments")
        .fetch_one(&mut *tx)
        .await?;
    if department_count == 0 {
        for &(name, description) in SEED_DEPARTMENTS {
            sqlx::query("INSERT INTO departments (name, description) VALUES (?, ?)")
                .bind(name)
                .bind(description)
                .execute(&mut *tx)
                .await?;
            report.departments += 1;
        }
    }

    let (treatment_count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM treatments")
        .fetch_one(&mut *tx)
        .await?;
    if treatment_count == 0 {
        for &(name, description) in SEED_TREATMENTS {
            sqlx::query("INSERT INTO treatments (treatment_name, description) VALUES (?, ?)")
                .bind(name)
                .bind(description)
                .execute(&mut *tx)
                .await?;
            report.treatments += 1;
        }
    }

    for account in [&SEED_ADMIN, &SEED_DOCTOR] {
        if seed_account(&mut tx, account).await? {
            report.accounts += 1;
        }
    }

    tx.commit().await?;

    info!(
        "Seed complete: {} departments, {} treatments, {} accounts inserted",
        report.departments, report.treatments, report.accounts
    );
    Ok(report)
}

async fn seed_account(tx: &mut Transaction<'_, Sqlite>, account: &SeedAccount) -> Result<bool, AppError> {
    let existing: Option<(i64,)> = sqlx::query_as("SELECT id FROM users WHERE username = ?")
        .bind(account.username)
        .fetch_optional(&mut **tx)
        .await?;
    if existing.is_some() {
        return Ok(false);
    }

    let specialization_id = match account.department {
        Some(name) => {
            let department: Option<(i64,)> = sqlx::query_as("SELECT id FROM departments WHERE name = ?")
                .bind(name)
                .fetch_optional(&mut **tx)
                .await?;
            match department {
                Some((id,)) => Some(id),
                // Doctor is tied to its department; skip until it exists.
                None => return Ok(false),
            }
        }
        None => None,
    };

    let password_hash = PasswordService::hash_password(account.password)?;

    sqlx::query(
        r#"INSERT INTO users
           (specialization_id, first_name, last_name, username, email, password_hash, role, created_at)
           VALUES (?, ?, ?, ?, ?, ?, ?, ?)"#,
    )
    .bind(specialization_id)
    .bind(account.first_name)
    .bind(account.last_name)
    .bind(account.username)
    .bind(account.email)
    .bind(password_hash)
    .bind(account.role.as_str())
    .bind(Utc::now())
    .execute(&mut **tx)
    .await?;

    Ok(true)
}
