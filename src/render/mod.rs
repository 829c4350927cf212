pub(crate) mod composite;
pub(crate) mod metrics;
pub(crate) mod paginate;
pub(crate) mod painter;
pub(crate) mod pipeline;
pub(crate) mod strip;
pub(crate) mod surface;
pub(crate) mod text;
