//-----------------------------------------------------------------------------
// Crate xilenv
// Path: src/lib.rs

//
// Rust client of the OpenXilEnv remote procedure call library XilEnvRpc
// The library is loaded at runtime from a XilEnv installation
//
// Unit tests run against an in process fake of XilEnvRpc
// Tests with a real XilEnv installation: cargo test --features=functional_tests -- --test-threads=1 --nocapture

// This crate is a library
#![crate_type = "lib"]
// The library crate is named "xilenv"
#![crate_name = "xilenv"]

//-----------------------------------------------------------------------------

// Submodule error
pub mod error;
pub use error::XilEnvError;
pub use error::XilEnvResult;

// Submodule config
pub mod config;
pub use config::XilEnvConfig;
pub use config::DEFAULT_VARIABLES;
pub use config::XILENV_INSTALL_PATH;

// Submodule rpc, library loader and typed exports
pub mod rpc;
pub use rpc::types::*;
pub use rpc::PlatformFiles;
pub use rpc::RpcFunctions;
pub use rpc::RpcLibrary;

// Submodule value
pub mod value;
pub use value::BbDataType;
pub use value::RawValue;

// Submodule xilenv, the session
pub mod xilenv;
pub use xilenv::blackboard::SymbolReference;
pub use xilenv::can::CanRecorderOptions;
pub use xilenv::ccp_xcp::Protocol;
pub use xilenv::scheduler::ProcessStartOptions;
pub use xilenv::scheduler::RangeControl;
pub use xilenv::CanMessage;
pub use xilenv::XilEnv;

// Submodule a2l
pub mod a2l;
pub use a2l::A2lArray;
pub use a2l::A2lData;
pub use a2l::A2lDataType;
pub use a2l::A2lElem;
pub use a2l::A2lElemType;
pub use a2l::A2lTargetType;
pub use a2l::A2lValue;
