pub mod canvas;
pub mod dashboard;
pub mod panels;
