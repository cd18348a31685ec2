mod csv_import;

pub(crate) use csv_import::{read_expenses, read_income};
