mod logs;
mod metrics;
mod otel;
mod parse_datetime;
mod shutdown;

pub use self::logs::init_logger;
pub use self::metrics::{Labels, Method, Metrics, Status};
pub use self::otel::{OperationTracer, Telemetry, TracingContext};
pub use self::parse_datetime::{parse_datetime, parse_query_datetime};
pub use self::shutdown::shutdown_signal;
