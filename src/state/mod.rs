pub(crate) mod dump;
pub(crate) mod layout_state;
pub(crate) mod render_tree;
pub(crate) mod views;
