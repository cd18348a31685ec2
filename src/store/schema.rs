pub(crate) const SCHEMA_V1: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS income (
    seq     INTEGER PRIMARY KEY AUTOINCREMENT,
    id      TEXT NOT NULL UNIQUE,
    month   TEXT NOT NULL,
    amount  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS expenses (
    seq           INTEGER PRIMARY KEY AUTOINCREMENT,
    id            TEXT NOT NULL UNIQUE,
    month         TEXT NOT NULL,
    category      TEXT NOT NULL,
    amount        TEXT NOT NULL,
    expense_type  TEXT NOT NULL DEFAULT 'essential'
);

CREATE TABLE IF NOT EXISTS predictions (
    seq                  INTEGER PRIMARY KEY AUTOINCREMENT,
    id                   TEXT NOT NULL UNIQUE,
    month                TEXT NOT NULL,
    total_income         TEXT NOT NULL,
    total_spending       TEXT NOT NULL,
    savings_ratio        TEXT NOT NULL,
    essential_ratio      TEXT NOT NULL,
    non_essential_ratio  TEXT NOT NULL,
    expense_growth_rate  TEXT NOT NULL,
    risk_level           TEXT NOT NULL,
    created_at           TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_income_month ON income(month);
CREATE INDEX IF NOT EXISTS idx_expenses_month ON expenses(month);
CREATE INDEX IF NOT EXISTS idx_predictions_month ON predictions(month);
"#;

pub(crate) const CURRENT_VERSION: i32 = 1;

/// Migrations from version N to N+1.
/// Each entry is (from_version, sql).
pub(crate) const MIGRATIONS: &[(i32, &str)] = &[];
