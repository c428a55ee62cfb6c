//! Database models for all entities in the system.
//!
//! Each entity ships three structs following the diesel conventions:
//! a `Queryable`/`Selectable` read model, an `Insertable` `New*` struct,
//! and (where updates are supported) an `AsChangeset` `Update*` struct.

mod attendance;
mod group;
mod score;
mod student;
mod user;

pub use attendance::{AttendanceRecord, NewAttendanceRecord};
pub use group::{Group, NewGroup};
pub use score::{NewScore, Score};
pub use student::{NewStudent, Student};
pub use user::{NewUser, UpdateUser, User};
