//! Configuration tests: file loading, validation and override precedence
