// Relational schema. Statements are idempotent and run in order at startup.

pub const CREATE_DEPARTMENTS: &str = r#"
CREATE TABLE IF NOT EXISTS departments (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        VARCHAR(150) NOT NULL UNIQUE,
    description TEXT
)"#;

pub const CREATE_TREATMENTS: &str = r#"
CREATE TABLE IF NOT EXISTS treatments (
    id             INTEGER PRIMARY KEY AUTOINCREMENT,
    treatment_name VARCHAR(120) NOT NULL,
    description    TEXT
)"#;

pub const CREATE_USERS: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id                INTEGER PRIMARY KEY AUTOINCREMENT,
    specialization_id INTEGER REFERENCES departments(id),
    first_name        VARCHAR(100) NOT NULL,
    last_name         VARCHAR(100) NOT NULL,
    phone             VARCHAR(20),
    date_of_birth     DATE,
    username          VARCHAR(150) NOT NULL UNIQUE,
    email             VARCHAR(150) NOT NULL UNIQUE,
    password_hash     TEXT NOT NULL,
    role              VARCHAR(16) NOT NULL CHECK (role IN ('admin', 'doctor', 'patient')),
    created_at        TEXT NOT NULL,
    CHECK (role = 'doctor' OR specialization_id IS NULL)
)"#;

pub const CREATE_APPOINTMENTS: &str = r#"
CREATE TABLE IF NOT EXISTS appointments (
    id                   INTEGER PRIMARY KEY AUTOINCREMENT,
    appointment_datetime TEXT NOT NULL,
    status               VARCHAR(21) NOT NULL DEFAULT 'Booked'
                         CHECK (status IN ('Booked', 'Completed', 'Cancelled')),
    patient_id           INTEGER NOT NULL REFERENCES users(id),
    doctor_id            INTEGER REFERENCES users(id),
    treatment_id         INTEGER NOT NULL REFERENCES treatments(id),
    department_id        INTEGER NOT NULL REFERENCES departments(id)
)"#;

pub const CREATE_SESSIONS: &str = r#"
CREATE TABLE IF NOT EXISTS sessions (
    session_id BLOB PRIMARY KEY,
    user_id    INTEGER NOT NULL REFERENCES users(id),
    role       VARCHAR(16) NOT NULL,
    created_at TEXT NOT NULL,
    expires_at TEXT NOT NULL
)"#;

pub const CREATE_INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_appointments_doctor ON appointments (doctor_id, appointment_datetime)",
    "CREATE INDEX IF NOT EXISTS idx_appointments_patient ON appointments (patient_id, appointment_datetime)",
    "CREATE INDEX IF NOT EXISTS idx_appointments_datetime ON appointments (appointment_datetime)",
    "CREATE INDEX IF NOT EXISTS idx_users_specialization ON users (specialization_id, role)",
    "CREATE INDEX IF NOT EXISTS idx_sessions_user ON sessions (user_id)",
];

pub fn statements() -> impl Iterator<Item = &'static str> {
    [
        CREATE_DEPARTMENTS,
        CREATE_TREATMENTS,
        CREATE_USERS,
        CREATE_APPOINTMENTS,
        CREATE_SESSIONS,
    ]
    .into_iter()
    .chain(CREATE_INDEXES.iter().copied())
}
