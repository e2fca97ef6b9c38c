pub mod config;
pub mod discovery;
pub mod engine;
pub mod format;
pub mod resolver;
pub mod testing;
pub mod transformer;

pub use config::{
    load_config, load_config_from_str, load_config_or_default, validate_config, Config,
    ConfigError, LogFormat, LoggingConfig, OutputConfig,
};
pub use discovery::{collect_sources, format_file_size};
pub use engine::{
    BatchEvent, BatchResult, CancelFlag, ChannelReporter, ConversionEngine, ConversionError,
    ConversionOutcome, ConversionRequest, EngineConfig, EngineError, FailureKind, NoopReporter,
    ProgressReporter,
};
pub use format::{Format, FormatCatalog, FormatError};
pub use resolver::{NamingPolicy, PathError, PathResolver, ResolvedOutput};
pub use transformer::{
    Invocation, InvocationOutput, PandocTransformer, Transformer, TransformerConfig,
    TransformerError,
};
