use serde::Serialize;

#[derive(Serialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

impl Health {
    pub fn healthy() -> Self {
        Self { status: "healthy" }
    }
}

/// Body of the service root endpoint.
#[derive(Serialize, Debug)]
pub struct Welcome {
    pub message: &'static str,
}

impl Default for Welcome {
    fn default() -> Self {
        Self { message: "Welcome to Pet Store API" }
    }
}
