pub(crate) mod affinity;
pub(crate) mod ids;
pub(crate) mod model;
pub(crate) mod reconcile;
