mod calculation_request;
mod calculation_result;
mod envelope;
mod order;

pub use calculation_request::{CalculationRequest, EnvironmentalFactors};
pub use calculation_result::{CalculationResult, FeedingSchedule, Ingredient, NutrientAnalysis};
pub use envelope::{Envelope, ErrorBody};
pub use order::{OrderConfirmation, OrderItem, OrderRequest};
