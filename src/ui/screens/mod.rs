pub(crate) mod analytics;
pub(crate) mod dashboard;
pub(crate) mod expenses;
pub(crate) mod income;
pub(crate) mod predict;
