// Define message types published on the wheel topics

use serde::{Deserialize, Serialize};

// Wheel command, same shape as std_msgs/Float64: {"data": 5.0}
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq)]
pub struct Float64 {
    pub data: f64,
}

impl From<f64> for Float64 {
    fn from(data: f64) -> Self {
        Self { data }
    }
}
