mod model_error;
mod simulation_model;

pub use model_error::ModelError;
pub use simulation_model::{
    ImportDeclaration, SimulationBlock, SimulationModel, VehicleAssignment,
};
