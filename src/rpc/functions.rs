//-----------------------------------------------------------------------------
// Module functions
// Typed function table of all XilEnvRpc exports
// All exports use the __stdcall calling convention on 32 bit Windows, which is extern "system"

#![allow(non_snake_case)]

#[allow(unused_imports)]
use log::{debug, error, info, trace, warn};
use std::ffi::{c_char, c_double, c_int, c_short};

use libloading::Library;

use super::types::{BbVari, CanAcceptMask, CanFdFifoElem, CanFifoElem, XilEnvLinkData};

// Generates struct RpcFunctions with one optional function pointer for each export XilEnv_<name>
macro_rules! rpc_functions {
    ( $( $name:ident : fn( $( $arg:ty ),* ) $( -> $ret:ty )? ; )* ) => {

        /// Function pointers resolved from a XilEnvRpc library
        /// An export missing in the loaded library is None
        #[derive(Default, Clone, Copy)]
        pub struct RpcFunctions {
            $( pub $name: Option<unsafe extern "system" fn( $( $arg ),* ) $( -> $ret )?>, )*
        }

        impl RpcFunctions {
            /// Resolve all exports of a loaded library
            pub fn resolve(library: &Library) -> RpcFunctions {
                let mut functions = RpcFunctions::default();
                $(
                    // @@@@ Unsafe - symbol lookup, the signature is given by XilEnvRpc.h
                    functions.$name = unsafe {
                        library
                            .get::<unsafe extern "system" fn( $( $arg ),* ) $( -> $ret )?>(concat!("XilEnv_", stringify!($name), "\0").as_bytes())
                            .ok()
                            .map(|symbol| *symbol)
                    };
                    if functions.$name.is_none() {
                        debug!("XilEnvRpc: {} not exported", concat!("XilEnv_", stringify!($name)));
                    }
                )*
                functions
            }

            /// Names of all exports which are not resolved
            pub fn missing(&self) -> Vec<&'static str> {
                let mut missing = Vec::new();
                $(
                    if self.$name.is_none() {
                        missing.push(concat!("XilEnv_", stringify!($name)));
                    }
                )*
                missing
            }

            /// Number of resolved exports
            pub fn count(&self) -> usize {
                let mut count = 0;
                $(
                    if self.$name.is_some() {
                        count += 1;
                    }
                )*
                count
            }
        }

        impl std::fmt::Debug for RpcFunctions {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.debug_struct("RpcFunctions").field("resolved", &self.count()).field("missing", &self.missing().len()).finish()
            }
        }
    };
}

rpc_functions! {

    // Connect
    ConnectTo: fn(*const c_char) -> c_int;
    ConnectToInstance: fn(*const c_char, *const c_char) -> c_int;
    DisconnectFrom: fn() -> c_int;
    DisconnectAndClose: fn(c_int, c_int) -> c_int;
    IsConnectedTo: fn() -> c_int;
    GetVersion: fn() -> c_int;
    GetAPIVersion: fn() -> c_int;
    GetAPIAlternativeVersion: fn() -> c_int;
    GetAPIModulePath: fn() -> *const c_char;

    // Other
    CreateFileWithContent: fn(*const c_char, *const c_char) -> c_int;
    CopyFileToLocal: fn(*const c_char, *const c_char) -> c_int;
    CopyFileFromLocal: fn(*const c_char, *const c_char) -> c_int;
    GetEnvironVar: fn(*const c_char) -> *const c_char;
    SetEnvironVar: fn(*const c_char, *const c_char) -> c_int;
    ChangeSettings: fn(*const c_char, *const c_char) -> c_int;
    TextOut: fn(*const c_char) -> c_int;
    ErrorTextOut: fn(c_int, *const c_char) -> c_int;

    // Scheduler
    StopScheduler: fn();
    ContinueScheduler: fn();
    IsSchedulerRunning: fn() -> c_int;
    StartProcess: fn(*const c_char) -> c_int;
    StartProcessAndLoadSvl: fn(*const c_char, *const c_char) -> c_int;
    StartProcessEx: fn(
        *const c_char, c_int, c_int, c_short, c_int, *const c_char, *const c_char,
        c_int, c_int, c_int, c_int, c_int, c_int, *const c_char, c_int, *const c_char, c_int, c_int
    ) -> c_int;
    StartProcessEx2: fn(
        *const c_char, c_int, c_int, c_short, c_int, *const c_char, *const c_char, c_int, *const c_char,
        c_int, c_int, c_int, c_int, c_int, c_int, *const c_char, c_int, *const c_char, c_int, c_int
    ) -> c_int;
    StopProcess: fn(*const c_char) -> c_int;
    GetNextProcess: fn(c_int, *const c_char) -> *const c_char;
    GetProcessState: fn(*const c_char) -> c_int;
    DoNextCycles: fn(c_int);
    DoNextCyclesAndWait: fn(c_int);
    AddBeforeProcessEquationFromFile: fn(c_int, *const c_char, *const c_char) -> c_int;
    AddBehindProcessEquationFromFile: fn(c_int, *const c_char, *const c_char) -> c_int;
    DelBeforeProcessEquations: fn(c_int, *const c_char);
    DelBehindProcessEquations: fn(c_int, *const c_char);
    WaitUntil: fn(*const c_char, c_int) -> c_int;

    // Internal processes
    StartScript: fn(*const c_char) -> c_int;
    StopScript: fn() -> c_int;
    StartRecorder: fn(*const c_char) -> c_int;
    StopRecorder: fn() -> c_int;
    RecorderAddComment: fn(*const c_char) -> c_int;
    StartPlayer: fn(*const c_char) -> c_int;
    StopPlayer: fn() -> c_int;
    StartEquations: fn(*const c_char) -> c_int;
    StopEquations: fn() -> c_int;
    StartGenerator: fn(*const c_char) -> c_int;
    StopGenerator: fn() -> c_int;

    // GUI
    LoadDesktop: fn(*const c_char) -> c_int;
    SaveDesktop: fn(*const c_char) -> c_int;
    ClearDesktop: fn() -> c_int;
    CreateDialog: fn(*const c_char) -> c_int;
    AddDialogItem: fn(*const c_char, *const c_char) -> c_int;
    ShowDialog: fn() -> c_int;
    IsDialogClosed: fn() -> c_int;
    SelectSheet: fn(*const c_char) -> c_int;
    AddSheet: fn(*const c_char) -> c_int;
    DeleteSheet: fn(*const c_char) -> c_int;
    RenameSheet: fn(*const c_char, *const c_char) -> c_int;
    OpenWindow: fn(*const c_char) -> c_int;
    CloseWindow: fn(*const c_char) -> c_int;
    DeleteWindow: fn(*const c_char) -> c_int;
    ImportWindow: fn(*const c_char, *const c_char) -> c_int;
    ExportWindow: fn(*const c_char, *const c_char, *const c_char) -> c_int;

    // Blackboard
    AddVari: fn(*const c_char, c_int, *const c_char) -> c_int;
    RemoveVari: fn(c_int) -> c_int;
    AttachVari: fn(*const c_char) -> c_int;
    Get: fn(c_int) -> c_double;
    GetPhys: fn(c_int) -> c_double;
    Set: fn(c_int, c_double);
    SetPhys: fn(c_int, c_double) -> c_int;
    Equ: fn(*const c_char) -> c_double;
    WrVariEnable: fn(*const c_char, *const c_char) -> c_int;
    WrVariDisable: fn(*const c_char, *const c_char) -> c_int;
    IsWrVariEnabled: fn(*const c_char, *const c_char) -> c_int;
    LoadRefList: fn(*const c_char, *const c_char) -> c_int;
    AddRefList: fn(*const c_char, *const c_char) -> c_int;
    SaveRefList: fn(*const c_char, *const c_char) -> c_int;
    GetVariConversionType: fn(c_int) -> c_int;
    GetVariConversionString: fn(c_int) -> *const c_char;
    SetVariConversion: fn(c_int, c_int, *const c_char) -> c_int;
    GetVariType: fn(c_int) -> c_int;
    GetVariUnit: fn(c_int) -> *const c_char;
    SetVariUnit: fn(c_int, *const c_char) -> c_int;
    GetVariMin: fn(c_int) -> c_double;
    GetVariMax: fn(c_int) -> c_double;
    SetVariMin: fn(c_int, c_double) -> c_int;
    SetVariMax: fn(c_int, c_double) -> c_int;
    GetNextVari: fn(c_int, *const c_char) -> *const c_char;
    GetNextVariEx: fn(c_int, *const c_char, *const c_char, c_int) -> *const c_char;
    GetVariEnum: fn(c_int, c_double) -> *const c_char;
    GetVariDisplayFormatWidth: fn(c_int) -> c_int;
    GetVariDisplayFormatPrec: fn(c_int) -> c_int;
    SetVariDisplayFormat: fn(c_int, c_int, c_int) -> c_int;
    ImportVariProperties: fn(*const c_char) -> c_int;
    EnableRangeControl: fn(*const c_char, *const c_char) -> c_int;
    DisableRangeControl: fn(*const c_char, *const c_char) -> c_int;
    WriteFrame: fn(*const c_int, *const c_double, c_int) -> c_int;
    GetFrame: fn(*const c_int, *mut c_double, c_int) -> c_int;
    WriteFrameWaitReadFrame: fn(*const c_int, *const c_double, c_int, *const c_int, *mut c_double, c_int) -> c_int;
    ReferenceSymbol: fn(
        *const c_char, *const c_char, *const c_char, *const c_char, c_int, *const c_char,
        c_double, c_double, c_int, c_int, c_int, c_int
    ) -> c_int;
    DereferenceSymbol: fn(*const c_char, *const c_char, c_int) -> c_int;
    GetRaw: fn(c_int, *mut BbVari) -> c_int;
    SetRaw: fn(c_int, c_int, BbVari, c_int) -> c_int;

    // Calibration
    LoadSvl: fn(*const c_char, *const c_char) -> c_int;
    SaveSvl: fn(*const c_char, *const c_char, *const c_char) -> c_int;
    SaveSal: fn(*const c_char, *const c_char, *const c_char) -> c_int;
    GetSymbolRaw: fn(*const c_char, *const c_char, c_int, *mut BbVari) -> c_int;
    SetSymbolRaw: fn(*const c_char, *const c_char, c_int, c_int, BbVari) -> c_int;

    // CAN
    SetCanChannelCount: fn(c_int) -> c_int;
    SetCanChannelStartupState: fn(c_int, c_int) -> c_int;
    LoadCanVariante: fn(*const c_char, c_int) -> c_int;
    LoadAndSelCanVariante: fn(*const c_char, c_int) -> c_int;
    AppendCanVariante: fn(*const c_char, c_int) -> c_int;
    DelAllCanVariants: fn();
    TransmitCAN: fn(c_int, c_int, c_int, c_int, u8, u8, u8, u8, u8, u8, u8, u8) -> c_int;
    TransmitCANFd: fn(c_int, c_int, c_int, c_int, *const u8) -> c_int;

    // CCP
    LoadCCPConfig: fn(c_int, *const c_char) -> c_int;
    StartCCPBegin: fn(c_int) -> c_int;
    StartCCPAddVar: fn(c_int, *const c_char) -> c_int;
    StartCCPEnd: fn(c_int) -> c_int;
    StopCCP: fn(c_int) -> c_int;
    StartCCPCalBegin: fn(c_int) -> c_int;
    StartCCPCalAddVar: fn(c_int, *const c_char) -> c_int;
    StartCCPCalEnd: fn(c_int) -> c_int;
    StopCCPCal: fn(c_int) -> c_int;

    // XCP
    LoadXCPConfig: fn(c_int, *const c_char) -> c_int;
    StartXCPBegin: fn(c_int) -> c_int;
    StartXCPAddVar: fn(c_int, *const c_char) -> c_int;
    StartXCPEnd: fn(c_int) -> c_int;
    StopXCP: fn(c_int) -> c_int;
    StartXCPCalBegin: fn(c_int) -> c_int;
    StartXCPCalAddVar: fn(c_int, *const c_char) -> c_int;
    StartXCPCalEnd: fn(c_int) -> c_int;
    StopXCPCal: fn(c_int) -> c_int;

    // CAN message queues
    OpenCANQueue: fn(c_int) -> c_int;
    OpenCANFdQueue: fn(c_int, c_int) -> c_int;
    SetCANAcceptanceWindows: fn(c_int, *const CanAcceptMask) -> c_int;
    FlushCANQueue: fn(c_int) -> c_int;
    ReadCANQueue: fn(c_int, *mut CanFifoElem) -> c_int;
    ReadCANFdQueue: fn(c_int, *mut CanFdFifoElem) -> c_int;
    TransmitCANQueue: fn(c_int, *const CanFifoElem) -> c_int;
    TransmitCANFdQueue: fn(c_int, *const CanFdFifoElem) -> c_int;
    CloseCANQueue: fn() -> c_int;

    // CAN bit error
    SetCanErr: fn(c_int, c_int, c_int, c_int, *const c_char, u32, u64) -> c_int;
    SetCanErrSignalName: fn(c_int, c_int, *const c_char, u32, u64) -> c_int;
    ClearCanErr: fn() -> c_int;
    SetCanSignalConversion: fn(c_int, c_int, *const c_char, *const c_char) -> c_int;
    ResetCanSignalConversion: fn(c_int, c_int, *const c_char) -> c_int;
    ResetAllCanSignalConversion: fn(c_int, c_int) -> c_int;

    // CAN recorder
    StartCANRecorder: fn(*const c_char, *const c_char, c_int, c_int, c_int, c_int, c_int, *const CanAcceptMask) -> c_int;
    StopCANRecorder: fn() -> c_int;

    // A2L links
    SetupLinkToExternProcess: fn(*const c_char, *const c_char, c_int) -> c_int;
    GetLinkToExternProcess: fn(*const c_char) -> c_int;
    GetIndexFromLink: fn(c_int, *const c_char, c_int) -> c_int;
    GetNextSymbolFromLink: fn(c_int, c_int, c_int, *const c_char, *mut c_char, c_int) -> c_int;
    GetDataFromLink: fn(c_int, c_int, *mut XilEnvLinkData, c_int, *mut *const c_char) -> *mut XilEnvLinkData;
    SetDataToLink: fn(c_int, c_int, *mut XilEnvLinkData, *mut *const c_char) -> c_int;
    ReferenceMeasurementToBlackboard: fn(c_int, c_int, c_int) -> c_int;
    DereferenceMeasurementFromBlackboard: fn(c_int, c_int) -> c_int;

    // A2L link data helpers
    GetLinkDataType: fn(*mut XilEnvLinkData) -> c_int;
    GetLinkDataArrayCount: fn(*mut XilEnvLinkData) -> c_int;
    GetLinkDataArraySize: fn(*mut XilEnvLinkData, c_int) -> c_int;
    CopyLinkData: fn(*mut XilEnvLinkData) -> *mut XilEnvLinkData;
    FreeLinkData: fn(*mut XilEnvLinkData) -> *mut XilEnvLinkData;
    PrintLinkData: fn(*mut XilEnvLinkData);

    // A2L link data single values
    GetLinkSingleValueDataType: fn(*mut XilEnvLinkData) -> c_int;
    GetLinkSingleValueTargetDataType: fn(*mut XilEnvLinkData) -> c_int;
    GetLinkSingleValueFlags: fn(*mut XilEnvLinkData) -> u32;
    GetLinkSingleValueAddress: fn(*mut XilEnvLinkData) -> u64;
    GetLinkSingleValueDimensionCount: fn(*mut XilEnvLinkData) -> c_int;
    GetLinkSingleValueDimension: fn(*mut XilEnvLinkData, c_int) -> c_int;
    GetLinkSingleValueDataDouble: fn(*mut XilEnvLinkData) -> c_double;
    SetLinkSingleValueDataDouble: fn(*mut XilEnvLinkData, c_double) -> c_int;
    GetLinkSingleValueDataInt: fn(*mut XilEnvLinkData) -> i64;
    SetLinkSingleValueDataInt: fn(*mut XilEnvLinkData, i64) -> c_int;
    GetLinkSingleValueDataUint: fn(*mut XilEnvLinkData) -> u64;
    SetLinkSingleValueDataUint: fn(*mut XilEnvLinkData, u64) -> c_int;
    GetLinkSingleValueDataStringPtr: fn(*mut XilEnvLinkData) -> *const c_char;
    SetLinkSingleValueDataString: fn(*mut XilEnvLinkData, *const c_char) -> c_int;
    GetLinkSingleValueUnitPtr: fn(*mut XilEnvLinkData) -> *const c_char;

    // A2L link data arrays
    GetLinkArrayValueDataType: fn(*mut XilEnvLinkData, c_int, c_int) -> c_int;
    GetLinkArrayValueTargetDataType: fn(*mut XilEnvLinkData, c_int, c_int) -> c_int;
    GetLinkArrayValueFlags: fn(*mut XilEnvLinkData, c_int, c_int) -> u32;
    GetLinkArrayValueAddress: fn(*mut XilEnvLinkData, c_int, c_int) -> u64;
    GetLinkArrayValueDimensionCount: fn(*mut XilEnvLinkData, c_int) -> c_int;
    GetLinkArrayValueDimension: fn(*mut XilEnvLinkData, c_int, c_int) -> c_int;
    GetLinkArrayValueDataDouble: fn(*mut XilEnvLinkData, c_int, c_int) -> c_double;
    SetLinkArrayValueDataDouble: fn(*mut XilEnvLinkData, c_int, c_int, c_double) -> c_int;
    GetLinkArrayValueDataInt: fn(*mut XilEnvLinkData, c_int, c_int) -> i64;
    SetLinkArrayValueDataInt: fn(*mut XilEnvLinkData, c_int, c_int, i64) -> c_int;
    GetLinkArrayValueDataUint: fn(*mut XilEnvLinkData, c_int, c_int) -> u64;
    SetLinkArrayValueDataUint: fn(*mut XilEnvLinkData, c_int, c_int, u64) -> c_int;
    GetLinkArrayValueDataStringPtr: fn(*mut XilEnvLinkData, c_int, c_int) -> *const c_char;
    SetLinkArrayValueDataString: fn(*mut XilEnvLinkData, c_int, c_int, *const c_char) -> c_int;
    GetLinkArrayValueUnitPtr: fn(*mut XilEnvLinkData, c_int, c_int) -> *const c_char;
}
