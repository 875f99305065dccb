use const_format::concatcp;

pub mod error;
pub mod payloads;
pub mod response_errors;

pub const API_BASE_PATH: &str = "/api/";

/// Placeholder for the record identifier in route paths
pub const ID_SEGMENT: &str = ":id";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Object {
    Users,
    UserExercises,
    UserLogs,
}

impl Object {
    pub const fn path(&self) -> &'static str {
        use Object::*;
        match self {
            Users => concatcp!(API_BASE_PATH, "users"),
            UserExercises => concatcp!(API_BASE_PATH, "users/", ID_SEGMENT, "/exercises"),
            UserLogs => concatcp!(API_BASE_PATH, "users/", ID_SEGMENT, "/logs"),
        }
    }

    /// The path with the id placeholder filled in
    pub fn path_for<T: ToString>(&self, id: T) -> String {
        self.path().replace(ID_SEGMENT, &id.to_string())
    }
}
