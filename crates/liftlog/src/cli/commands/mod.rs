pub mod auth;
pub mod exercises;
pub mod history;
pub mod profile;
pub mod session;
pub mod workouts;

pub use auth::{login, logout, register, status};
pub use exercises::{add_planned, list as list_exercises, list_planned};
pub use history::{list as list_history, show as show_history};
pub use profile::{change_password, show as show_profile};
pub use session::start as start_workout;
pub use workouts::{
    create as create_workout, delete as delete_workouts, edit as edit_workout,
    list as list_workouts, show as show_workout,
};
