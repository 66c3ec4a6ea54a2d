pub(crate) mod blur;
pub(crate) mod canvas;
pub(crate) mod composite;
