pub mod descriptor;
pub mod tour;
