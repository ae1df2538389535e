pub mod flow_window;
pub mod normalize;
pub mod refresh;
pub mod remote;
