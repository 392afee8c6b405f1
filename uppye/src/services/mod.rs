pub mod classrooms;
pub mod directory;
