pub(crate) mod status;
pub(crate) mod working_range;
