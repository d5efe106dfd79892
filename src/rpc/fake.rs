//-----------------------------------------------------------------------------
// Module fake
// In process XilEnvRpc implementation for the unit tests
// Keeps a small simulated XilEnv per test thread: connection, blackboard, processes, CAN queue and one A2L file

#![allow(non_snake_case)]

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};
use std::ffi::{c_char, c_double, c_int, c_short, CString};

use super::types::{BbVari, CanAcceptMask, CanFdFifoElem, CanFifoElem, XilEnvLinkData};
use super::{from_cstr, RpcFunctions, RpcLibrary};
use crate::a2l::A2lElem;
use crate::config::XilEnvConfig;
use crate::value::{BbDataType, RawValue};
use crate::xilenv::{CanMessage, XilEnv};

pub(crate) const FAKE_API_VERSION: i32 = 0x0100;
pub(crate) const FAKE_VERSION: i32 = 0x0800;

//-----------------------------------------------------------------------------
// Simulated state

#[derive(Debug, Clone)]
pub(crate) struct FakeVariable {
    pub name: String,
    pub data_type: i32,
    pub unit: String,
    pub value: f64,
    pub min: f64,
    pub max: f64,
    pub conversion_type: i32,
    pub conversion: String,
    pub width: i32,
    pub prec: i32,
}

#[derive(Debug, Clone)]
pub(crate) struct FakeElem {
    pub elem_type: i32,
    pub value: A2lElem,
    pub text: CString,
    pub unit: CString,
    pub flags: u32,
    pub target_type: i32,
    pub address: u64,
}

impl FakeElem {
    fn new(value: A2lElem, unit: &str, flags: u32, target_type: i32, address: u64) -> FakeElem {
        let elem_type = match value {
            A2lElem::Int(_) => 0,
            A2lElem::Uint(_) => 1,
            A2lElem::Double(_) => 2,
            A2lElem::Text(_) => 4,
        };
        let text = match &value {
            A2lElem::Text(t) => CString::new(t.as_str()).unwrap_or_default(),
            _ => CString::default(),
        };
        FakeElem {
            elem_type,
            value,
            text,
            unit: CString::new(unit).unwrap_or_default(),
            flags,
            target_type,
            address,
        }
    }

    fn get_int(&self) -> i64 {
        match self.value {
            A2lElem::Int(v) => v,
            A2lElem::Uint(v) => v as i64,
            A2lElem::Double(v) => v as i64,
            A2lElem::Text(_) => 0,
        }
    }

    fn get_uint(&self) -> u64 {
        match self.value {
            A2lElem::Int(v) => v as u64,
            A2lElem::Uint(v) => v,
            A2lElem::Double(v) => v as u64,
            A2lElem::Text(_) => 0,
        }
    }

    fn set_text(&mut self, text: String) {
        self.text = CString::new(text.as_str()).unwrap_or_default();
        self.value = A2lElem::Text(text);
    }
}

/// Link data handed out as XILENV_LINK_DATA
/// Single values are the only element of the only array, with no dimensions
#[derive(Debug, Clone)]
pub(crate) struct FakeLinkData {
    pub label: String,
    pub data_type: i32,
    pub dims: Vec<Vec<i32>>,
    pub elems: Vec<Vec<FakeElem>>,
}

impl FakeLinkData {
    fn single(label: &str, data_type: i32, elem: FakeElem) -> FakeLinkData {
        FakeLinkData {
            label: label.to_string(),
            data_type,
            dims: Vec::new(),
            elems: vec![vec![elem]],
        }
    }

    fn array(label: &str, data_type: i32, dims: Vec<Vec<i32>>, elems: Vec<Vec<FakeElem>>) -> FakeLinkData {
        FakeLinkData {
            label: label.to_string(),
            data_type,
            dims,
            elems,
        }
    }

    // A2L label type mask bit of the data type
    fn label_type(&self) -> i32 {
        match self.data_type {
            0 => 0x1,
            1 => 0x100,
            2 => 0x200,
            3 => 0x400,
            4 => 0x800,
            5 => 0x1000,
            6 => 0x2000,
            7 => 0x4000,
            _ => 0x8000,
        }
    }
}

const CAL: u32 = 0x1;
const MEA: u32 = 0x2;
const UNIT: u32 = 0x40;

// Labels of the A2L file of ExtProc_Sample
fn sample_labels() -> Vec<FakeLinkData> {
    let map = (0..6).map(|i| FakeElem::new(A2lElem::Double(i as f64), "Nm", CAL | UNIT, 7, 0x2000 + 8 * i as u64)).collect();
    let axis = (0..4).map(|i| FakeElem::new(A2lElem::Double(i as f64 * 10.0), "rpm", CAL | UNIT, 7, 0x3000 + 8 * i as u64)).collect();
    let curve = (0..4).map(|i| FakeElem::new(A2lElem::Double(i as f64 * 0.5), "", CAL, 7, 0x3100 + 8 * i as u64)).collect();
    let block = (0..5).map(|i| FakeElem::new(A2lElem::Int(i - 2), "", CAL, 4, 0x3200 + 4 * i as u64)).collect();
    let cuboid = (0..24).map(|i| FakeElem::new(A2lElem::Double(i as f64), "K", CAL | UNIT, 7, 0x4000 + 8 * i as u64)).collect();
    vec![
        FakeLinkData::single("ampl", 1, FakeElem::new(A2lElem::Double(100.0), "V", CAL | UNIT, 7, 0x1000)),
        FakeLinkData::single("counter_max", 1, FakeElem::new(A2lElem::Uint(255), "", CAL, 3, 0x1008)),
        FakeLinkData::single("mode", 1, FakeElem::new(A2lElem::from("ON"), "-", CAL | UNIT, 1, 0x1010)),
        FakeLinkData::array("map", 5, vec![vec![3, 2]], vec![map]),
        FakeLinkData::array("curve_axis", 4, vec![vec![4], vec![4]], vec![axis, curve]),
        FakeLinkData::array("val_blk", 3, vec![vec![5]], vec![block]),
        FakeLinkData::array("cuboid", 6, vec![vec![2, 3, 4]], vec![cuboid]),
        FakeLinkData::single("counter", 0, FakeElem::new(A2lElem::Uint(0), "", MEA, 3, 0x1018)),
    ]
}

#[derive(Debug)]
pub(crate) struct FakeState {
    /// Names of all called exports without the XilEnv_ prefix
    pub calls: Vec<String>,
    ret_string: CString,

    // Connection
    pub connected: bool,
    pub connect_failures: u32,
    pub instance: String,
    pub exit_code: Option<i32>,

    // Files, environment and settings
    pub files: HashMap<String, String>,
    pub environ: HashMap<String, String>,
    pub settings: HashMap<String, String>,
    pub last_args: Vec<String>,

    // Scheduler and processes
    pub scheduler_running: bool,
    pub cycle_counter: u64,
    pub wait_until_remaining: i32,
    pub last_equation: String,
    pub last_wait_cycles: i32,
    pub processes: Vec<String>,
    process_iter: usize,
    pub last_a2l_flags: i32,

    // GUI
    pub sheets: Vec<String>,

    // Blackboard
    pub variables: BTreeMap<i32, FakeVariable>,
    next_vid: i32,
    vari_iter: i32,

    // Symbols of external processes
    pub symbols: HashMap<(String, String), RawValue>,
    pub last_symbol_flags: i32,

    // CAN
    pub can_sent: Vec<CanMessage>,
    pub can_queue_open: bool,
    pub can_windows: Vec<CanAcceptMask>,
    pub can_rx: VecDeque<CanMessage>,

    // CCP and XCP connections with loaded configuration
    pub protocol_configs: HashSet<(&'static str, i32)>,

    // A2L links
    pub links: HashMap<String, i32>,
    pub labels: Vec<FakeLinkData>,
    pub link_data_allocated: usize,
    pub link_data_freed: usize,
}

impl Default for FakeState {
    fn default() -> Self {
        FakeState {
            calls: Vec::new(),
            ret_string: CString::default(),
            connected: false,
            connect_failures: 0,
            instance: String::new(),
            exit_code: None,
            files: HashMap::new(),
            environ: HashMap::new(),
            settings: HashMap::new(),
            last_args: Vec::new(),
            scheduler_running: true,
            cycle_counter: 0,
            wait_until_remaining: 1,
            last_equation: String::new(),
            last_wait_cycles: 0,
            processes: Vec::new(),
            process_iter: 0,
            last_a2l_flags: 0,
            sheets: vec!["Default".to_string()],
            variables: BTreeMap::new(),
            next_vid: 1,
            vari_iter: 0,
            symbols: HashMap::new(),
            last_symbol_flags: 0,
            can_sent: Vec::new(),
            can_queue_open: false,
            can_windows: Vec::new(),
            can_rx: VecDeque::new(),
            protocol_configs: HashSet::new(),
            links: HashMap::new(),
            labels: sample_labels(),
            link_data_allocated: 0,
            link_data_freed: 0,
        }
    }
}

impl FakeState {
    pub fn count_calls(&self, name: &str) -> usize {
        self.calls.iter().filter(|c| c.as_str() == name).count()
    }

    /// Create a double variable, as if another process had created it
    pub fn add_variable(&mut self, name: &str, value: f64) -> i32 {
        let vid = self.add_vari(name, BbDataType::Double.to_raw(), "");
        if let Some(v) = self.variables.get_mut(&vid) {
            v.value = value;
        }
        vid
    }

    fn add_vari(&mut self, name: &str, data_type: i32, unit: &str) -> i32 {
        if let Some(vid) = self.find_vari(name) {
            return vid;
        }
        let vid = self.next_vid;
        self.next_vid += 1;
        self.variables.insert(
            vid,
            FakeVariable {
                name: name.to_string(),
                data_type,
                unit: unit.to_string(),
                value: 0.0,
                min: 0.0,
                max: 1.0,
                conversion_type: 0,
                conversion: String::new(),
                width: 8,
                prec: 4,
            },
        );
        vid
    }

    fn find_vari(&self, name: &str) -> Option<i32> {
        self.variables.iter().find(|(_, v)| v.name == name).map(|(vid, _)| *vid)
    }

    fn remove_vari_by_name(&mut self, name: &str) -> c_int {
        match self.find_vari(name) {
            Some(vid) => {
                self.variables.remove(&vid);
                0
            }
            None => -1,
        }
    }

    // Store a value converted to the data type of the variable
    fn set_vari(&mut self, vid: i32, value: f64) -> c_int {
        match self.variables.get_mut(&vid) {
            Some(v) => {
                v.value = BbDataType::try_from(v.data_type)
                    .and_then(|t| RawValue::from_f64(t, value))
                    .map(|r| r.as_f64())
                    .unwrap_or(value);
                0
            }
            None => -1,
        }
    }

    fn get_vari(&self, vid: i32) -> f64 {
        self.variables.get(&vid).map_or(0.0, |v| v.value)
    }

    // Returned strings stay valid until the next call
    fn ret(&mut self, s: Option<String>) -> *const c_char {
        match s {
            Some(s) => {
                self.ret_string = CString::new(s).unwrap_or_default();
                self.ret_string.as_ptr()
            }
            None => std::ptr::null(),
        }
    }

    fn is_running(&self, process: &str) -> bool {
        self.processes.iter().any(|p| p == process)
    }

    fn start_process(&mut self, process: String) -> c_int {
        if !self.is_running(&process) {
            self.processes.push(process);
        }
        0
    }

    fn has_protocol_config(&self, protocol: &'static str, connection: i32) -> c_int {
        if self.protocol_configs.contains(&(protocol, connection)) { 0 } else { -1 }
    }

    fn is_accepted(&self, m: &CanMessage) -> bool {
        self.can_windows.is_empty()
            || self.can_windows.iter().any(|w| {
                let (channel, start_id, end_id) = (w.channel, w.start_id, w.end_id);
                channel == m.channel as i32 && start_id as u32 <= m.id && m.id <= end_id as u32
            })
    }

    fn is_link(&self, link: i32) -> bool {
        self.links.values().any(|l| *l == link)
    }
}

thread_local! {
    static STATE: RefCell<FakeState> = RefCell::new(FakeState::default());
}

/// Access the simulated XilEnv of the current test thread
pub(crate) fn with_state<R, F: FnOnce(&mut FakeState) -> R>(f: F) -> R {
    STATE.with(|state| f(&mut state.borrow_mut()))
}

pub(crate) fn reset_state() {
    with_state(|s| *s = FakeState::default());
}

/// Not connected session on a new simulated XilEnv
/// name must be unique, it identifies the XilEnvRpc module
pub(crate) fn fake_session(name: &str) -> XilEnv {
    reset_state();
    let config = XilEnvConfig {
        startup_delay_ms: 0,
        ..Default::default()
    };
    XilEnv::with_library(RpcLibrary::from_functions(name, fake_functions()), config)
}

/// Connected session on a new simulated XilEnv, no variables attached
pub(crate) fn connected_session(name: &str) -> XilEnv {
    let mut xil = fake_session(name);
    xil.connect_to("").unwrap();
    xil
}

//-----------------------------------------------------------------------------
// Marshalling helpers

fn arg(p: *const c_char) -> String {
    from_cstr(p).unwrap_or_default()
}

fn slice<'a, T>(p: *const T, n: c_int) -> &'a [T] {
    if p.is_null() || n <= 0 {
        &[]
    } else {
        // @@@@ Unsafe - the caller passes n valid elements
        unsafe { std::slice::from_raw_parts(p, n as usize) }
    }
}

fn slice_mut<'a, T>(p: *mut T, n: c_int) -> &'a mut [T] {
    if p.is_null() || n <= 0 {
        &mut []
    } else {
        // @@@@ Unsafe - the caller passes n writable elements
        unsafe { std::slice::from_raw_parts_mut(p, n as usize) }
    }
}

fn link_data<'a>(p: *mut XilEnvLinkData) -> &'a mut FakeLinkData {
    // @@@@ Unsafe - all link data pointers are created from boxed FakeLinkData by GetDataFromLink or CopyLinkData
    unsafe { &mut *(p as *mut FakeLinkData) }
}

fn array_elem<'a>(p: *mut XilEnvLinkData, an: c_int, i: c_int) -> &'a mut FakeElem {
    &mut link_data(p).elems[an as usize][i as usize]
}

fn single_elem<'a>(p: *mut XilEnvLinkData) -> &'a mut FakeElem {
    array_elem(p, 0, 0)
}

fn into_link_data(data: FakeLinkData) -> *mut XilEnvLinkData {
    Box::into_raw(Box::new(data)) as *mut XilEnvLinkData
}

/// Filter with the wildcards * and ?
fn matches_filter(filter: &str, name: &str) -> bool {
    fn m(f: &[char], n: &[char]) -> bool {
        match (f.first(), n.first()) {
            (None, None) => true,
            (Some('*'), _) => m(&f[1..], n) || (!n.is_empty() && m(f, &n[1..])),
            (Some('?'), Some(_)) => m(&f[1..], &n[1..]),
            (Some(a), Some(b)) if a == b => m(&f[1..], &n[1..]),
            _ => false,
        }
    }
    let f: Vec<char> = filter.chars().collect();
    let n: Vec<char> = name.chars().collect();
    m(&f, &n)
}

// Text of an enum conversion "from to \"text\"; ..." for a value
fn enum_text(conversion: &str, value: f64) -> Option<String> {
    conversion.split(';').find_map(|entry| {
        let mut parts = entry.trim().splitn(3, ' ');
        let from: f64 = parts.next()?.parse().ok()?;
        let to: f64 = parts.next()?.parse().ok()?;
        let text = parts.next()?.trim().trim_matches('"');
        if from <= value && value <= to { Some(text.to_string()) } else { None }
    })
}

//-----------------------------------------------------------------------------
// Exports

// Defines the fake exports and fake_functions(), every call is recorded in FakeState::calls
macro_rules! fake_exports {
    ( $( fn $name:ident ( $( $arg:ident : $ty:ty ),* $(,)? ) $( -> $ret:ty )? |$s:ident| $body:block )* ) => {
        $(
            unsafe extern "system" fn $name( $( $arg: $ty ),* ) $( -> $ret )? {
                with_state(|$s| {
                    $s.calls.push(stringify!($name).to_string());
                    $body
                })
            }
        )*

        /// Function table of the simulated XilEnv
        pub(crate) fn fake_functions() -> RpcFunctions {
            let mut functions = RpcFunctions::default();
            $( functions.$name = Some($name); )*
            functions
        }
    };
}

fake_exports! {

    // Connect
    fn ConnectTo(_address: *const c_char) -> c_int |s| {
        if s.connect_failures > 0 {
            s.connect_failures -= 1;
            return -1;
        }
        s.connected = true;
        s.instance = String::new();
        0
    }
    fn ConnectToInstance(_address: *const c_char, instance: *const c_char) -> c_int |s| {
        if s.connect_failures > 0 {
            s.connect_failures -= 1;
            return -1;
        }
        s.connected = true;
        s.instance = arg(instance);
        0
    }
    fn DisconnectFrom() -> c_int |s| {
        s.connected = false;
        0
    }
    fn DisconnectAndClose(set_error_level: c_int, error_level: c_int) -> c_int |s| {
        s.connected = false;
        s.exit_code = Some(if set_error_level != 0 { error_level } else { 0 });
        0
    }
    fn IsConnectedTo() -> c_int |s| { s.connected as c_int }
    fn GetVersion() -> c_int |s| { FAKE_VERSION }
    fn GetAPIVersion() -> c_int |s| { FAKE_API_VERSION }
    fn GetAPIAlternativeVersion() -> c_int |s| { 0 }
    fn GetAPIModulePath() -> *const c_char |s| { s.ret(Some("fake".to_string())) }

    // Other
    fn CreateFileWithContent(filename: *const c_char, content: *const c_char) -> c_int |s| {
        s.files.insert(arg(filename), arg(content));
        0
    }
    fn CopyFileToLocal(_source: *const c_char, _destination: *const c_char) -> c_int |s| { 0 }
    fn CopyFileFromLocal(_source: *const c_char, _destination: *const c_char) -> c_int |s| { 0 }
    fn GetEnvironVar(name: *const c_char) -> *const c_char |s| {
        let value = s.environ.get(&arg(name)).cloned();
        s.ret(value)
    }
    fn SetEnvironVar(name: *const c_char, value: *const c_char) -> c_int |s| {
        s.environ.insert(arg(name), arg(value));
        0
    }
    fn ChangeSettings(setting: *const c_char, value: *const c_char) -> c_int |s| {
        s.settings.insert(arg(setting), arg(value));
        0
    }
    fn TextOut(_text: *const c_char) -> c_int |s| { 0 }
    fn ErrorTextOut(_level: c_int, _text: *const c_char) -> c_int |s| { 0 }

    // Scheduler
    fn StopScheduler() |s| { s.scheduler_running = false; }
    fn ContinueScheduler() |s| { s.scheduler_running = true; }
    fn IsSchedulerRunning() -> c_int |s| { s.scheduler_running as c_int }
    fn StartProcess(name: *const c_char) -> c_int |s| { s.start_process(arg(name)) }
    fn StartProcessAndLoadSvl(name: *const c_char, _svl: *const c_char) -> c_int |s| { s.start_process(arg(name)) }
    fn StartProcessEx(
        name: *const c_char, _prio: c_int, _cycle: c_int, _delay: c_short, _timeout: c_int, _svl: *const c_char, _bb_prefix: *const c_char,
        _use_rc: c_int, _rc_before: c_int, _rc_behind: c_int, _rc_stop: c_int, _rc_output: c_int, _rc_counter_flag: c_int,
        _rc_counter: *const c_char, _rc_control_flag: c_int, _rc_control: *const c_char, _rc_phys: c_int, _rc_limit: c_int
    ) -> c_int |s| {
        s.start_process(arg(name))
    }
    fn StartProcessEx2(
        name: *const c_char, _prio: c_int, _cycle: c_int, _delay: c_short, _timeout: c_int, _svl: *const c_char, _a2l: *const c_char,
        a2l_flags: c_int, _bb_prefix: *const c_char, _use_rc: c_int, _rc_before: c_int, _rc_behind: c_int, _rc_stop: c_int,
        _rc_output: c_int, _rc_counter_flag: c_int, _rc_counter: *const c_char, _rc_control_flag: c_int, _rc_control: *const c_char,
        _rc_phys: c_int, _rc_limit: c_int
    ) -> c_int |s| {
        s.last_a2l_flags = a2l_flags;
        s.start_process(arg(name))
    }
    fn StopProcess(name: *const c_char) -> c_int |s| {
        let name = arg(name);
        match s.processes.iter().position(|p| *p == name) {
            Some(i) => {
                s.processes.remove(i);
                0
            }
            None => -1,
        }
    }
    fn GetNextProcess(flag: c_int, filter: *const c_char) -> *const c_char |s| {
        let filter = arg(filter);
        if flag != 0 {
            s.process_iter = 0;
        }
        let next = s.processes.iter().enumerate().skip(s.process_iter).find(|(_, p)| matches_filter(&filter, p)).map(|(i, p)| (i, p.clone()));
        match next {
            Some((i, p)) => {
                s.process_iter = i + 1;
                s.ret(Some(p))
            }
            None => {
                s.process_iter = s.processes.len();
                std::ptr::null()
            }
        }
    }
    fn GetProcessState(name: *const c_char) -> c_int |s| {
        if s.is_running(&arg(name)) { 0 } else { -1 }
    }
    fn DoNextCycles(cycles: c_int) |s| { s.cycle_counter += cycles.max(0) as u64; }
    fn DoNextCyclesAndWait(cycles: c_int) |s| { s.cycle_counter += cycles.max(0) as u64; }
    fn AddBeforeProcessEquationFromFile(_nr: c_int, _process: *const c_char, _file: *const c_char) -> c_int |s| { 0 }
    fn AddBehindProcessEquationFromFile(_nr: c_int, _process: *const c_char, _file: *const c_char) -> c_int |s| { 0 }
    fn DelBeforeProcessEquations(_nr: c_int, _process: *const c_char) |s| {}
    fn DelBehindProcessEquations(_nr: c_int, _process: *const c_char) |s| {}
    fn WaitUntil(equation: *const c_char, cycles: c_int) -> c_int |s| {
        s.last_equation = arg(equation);
        s.last_wait_cycles = cycles;
        s.wait_until_remaining
    }

    // Internal processes
    fn StartScript(_file: *const c_char) -> c_int |s| { 0 }
    fn StopScript() -> c_int |s| { 0 }
    fn StartRecorder(_file: *const c_char) -> c_int |s| { 0 }
    fn StopRecorder() -> c_int |s| { 0 }
    fn RecorderAddComment(_comment: *const c_char) -> c_int |s| { 0 }
    fn StartPlayer(_file: *const c_char) -> c_int |s| { 0 }
    fn StopPlayer() -> c_int |s| { 0 }
    fn StartEquations(_file: *const c_char) -> c_int |s| { 0 }
    fn StopEquations() -> c_int |s| { 0 }
    fn StartGenerator(_file: *const c_char) -> c_int |s| { 0 }
    fn StopGenerator() -> c_int |s| { 0 }

    // GUI
    fn LoadDesktop(_file: *const c_char) -> c_int |s| { 0 }
    fn SaveDesktop(_file: *const c_char) -> c_int |s| { 0 }
    fn ClearDesktop() -> c_int |s| { 0 }
    fn CreateDialog(_name: *const c_char) -> c_int |s| { 0 }
    fn AddDialogItem(_description: *const c_char, _variable: *const c_char) -> c_int |s| { 0 }
    fn ShowDialog() -> c_int |s| { 0 }
    fn IsDialogClosed() -> c_int |s| { 0 }
    fn SelectSheet(sheet: *const c_char) -> c_int |s| {
        let sheet = arg(sheet);
        if s.sheets.contains(&sheet) { 0 } else { -1 }
    }
    fn AddSheet(sheet: *const c_char) -> c_int |s| {
        s.sheets.push(arg(sheet));
        0
    }
    fn DeleteSheet(sheet: *const c_char) -> c_int |s| {
        let sheet = arg(sheet);
        match s.sheets.iter().position(|x| *x == sheet) {
            Some(i) => {
                s.sheets.remove(i);
                0
            }
            None => -1,
        }
    }
    fn RenameSheet(old_name: *const c_char, new_name: *const c_char) -> c_int |s| {
        let old_name = arg(old_name);
        match s.sheets.iter_mut().find(|x| **x == old_name) {
            Some(sheet) => {
                *sheet = arg(new_name);
                0
            }
            None => -1,
        }
    }
    fn OpenWindow(_window: *const c_char) -> c_int |s| { 0 }
    fn CloseWindow(_window: *const c_char) -> c_int |s| { 0 }
    fn DeleteWindow(_window: *const c_char) -> c_int |s| { 0 }
    fn ImportWindow(_window: *const c_char, _file: *const c_char) -> c_int |s| { 0 }
    fn ExportWindow(sheet: *const c_char, window: *const c_char, file: *const c_char) -> c_int |s| {
        s.last_args = vec![arg(sheet), arg(window), arg(file)];
        0
    }

    // Blackboard
    fn AddVari(label: *const c_char, data_type: c_int, unit: *const c_char) -> c_int |s| {
        if BbDataType::try_from(data_type).is_err() {
            return -1;
        }
        s.add_vari(&arg(label), data_type, &arg(unit))
    }
    fn RemoveVari(vid: c_int) -> c_int |s| {
        if s.variables.remove(&vid).is_some() { 0 } else { -1 }
    }
    fn AttachVari(label: *const c_char) -> c_int |s| { s.find_vari(&arg(label)).unwrap_or(0) }
    fn Get(vid: c_int) -> c_double |s| { s.get_vari(vid) }
    fn GetPhys(vid: c_int) -> c_double |s| { s.get_vari(vid) }
    fn Set(vid: c_int, value: c_double) |s| { s.set_vari(vid, value); }
    fn SetPhys(vid: c_int, value: c_double) -> c_int |s| { s.set_vari(vid, value) }
    fn Equ(equation: *const c_char) -> c_double |s| {
        let equation = arg(equation);
        let equation = equation.trim();
        equation.parse().unwrap_or_else(|_| s.find_vari(equation).map_or(0.0, |vid| s.get_vari(vid)))
    }
    fn WrVariEnable(_label: *const c_char, _process: *const c_char) -> c_int |s| { 0 }
    fn WrVariDisable(_label: *const c_char, _process: *const c_char) -> c_int |s| { 0 }
    fn IsWrVariEnabled(_label: *const c_char, _process: *const c_char) -> c_int |s| { 1 }
    fn LoadRefList(_ref_list: *const c_char, _process: *const c_char) -> c_int |s| { 0 }
    fn AddRefList(_ref_list: *const c_char, _process: *const c_char) -> c_int |s| { 0 }
    fn SaveRefList(_ref_list: *const c_char, _process: *const c_char) -> c_int |s| { 0 }
    fn GetVariConversionType(vid: c_int) -> c_int |s| { s.variables.get(&vid).map_or(-1, |v| v.conversion_type) }
    fn GetVariConversionString(vid: c_int) -> *const c_char |s| {
        let conversion = s.variables.get(&vid).map(|v| v.conversion.clone());
        s.ret(conversion)
    }
    fn SetVariConversion(vid: c_int, conversion_type: c_int, conversion: *const c_char) -> c_int |s| {
        match s.variables.get_mut(&vid) {
            Some(v) => {
                v.conversion_type = conversion_type;
                v.conversion = arg(conversion);
                0
            }
            None => -1,
        }
    }
    fn GetVariType(vid: c_int) -> c_int |s| { s.variables.get(&vid).map_or(-1, |v| v.data_type) }
    fn GetVariUnit(vid: c_int) -> *const c_char |s| {
        let unit = s.variables.get(&vid).map(|v| v.unit.clone());
        s.ret(unit)
    }
    fn SetVariUnit(vid: c_int, unit: *const c_char) -> c_int |s| {
        match s.variables.get_mut(&vid) {
            Some(v) => {
                v.unit = arg(unit);
                0
            }
            None => -1,
        }
    }
    fn GetVariMin(vid: c_int) -> c_double |s| { s.variables.get(&vid).map_or(0.0, |v| v.min) }
    fn GetVariMax(vid: c_int) -> c_double |s| { s.variables.get(&vid).map_or(0.0, |v| v.max) }
    fn SetVariMin(vid: c_int, min: c_double) -> c_int |s| {
        match s.variables.get_mut(&vid) {
            Some(v) => {
                v.min = min;
                0
            }
            None => -1,
        }
    }
    fn SetVariMax(vid: c_int, max: c_double) -> c_int |s| {
        match s.variables.get_mut(&vid) {
            Some(v) => {
                v.max = max;
                0
            }
            None => -1,
        }
    }
    fn GetNextVari(flag: c_int, filter: *const c_char) -> *const c_char |s| {
        let filter = arg(filter);
        if flag != 0 {
            s.vari_iter = 0;
        }
        let next = s.variables.range(s.vari_iter + 1..).find(|(_, v)| matches_filter(&filter, &v.name)).map(|(vid, v)| (*vid, v.name.clone()));
        match next {
            Some((vid, name)) => {
                s.vari_iter = vid;
                s.ret(Some(name))
            }
            None => {
                s.vari_iter = i32::MAX - 1;
                std::ptr::null()
            }
        }
    }
    fn GetNextVariEx(flag: c_int, filter: *const c_char, _process: *const c_char, _access: c_int) -> *const c_char |s| {
        let filter = arg(filter);
        if flag != 0 {
            s.vari_iter = 0;
        }
        let next = s.variables.range(s.vari_iter + 1..).find(|(_, v)| matches_filter(&filter, &v.name)).map(|(vid, v)| (*vid, v.name.clone()));
        match next {
            Some((vid, name)) => {
                s.vari_iter = vid;
                s.ret(Some(name))
            }
            None => {
                s.vari_iter = i32::MAX - 1;
                std::ptr::null()
            }
        }
    }
    fn GetVariEnum(vid: c_int, value: c_double) -> *const c_char |s| {
        let text = s.variables.get(&vid).and_then(|v| enum_text(&v.conversion, value));
        s.ret(text)
    }
    fn GetVariDisplayFormatWidth(vid: c_int) -> c_int |s| { s.variables.get(&vid).map_or(-1, |v| v.width) }
    fn GetVariDisplayFormatPrec(vid: c_int) -> c_int |s| { s.variables.get(&vid).map_or(-1, |v| v.prec) }
    fn SetVariDisplayFormat(vid: c_int, width: c_int, prec: c_int) -> c_int |s| {
        match s.variables.get_mut(&vid) {
            Some(v) => {
                v.width = width;
                v.prec = prec;
                0
            }
            None => -1,
        }
    }
    fn ImportVariProperties(_file: *const c_char) -> c_int |s| { 0 }
    fn EnableRangeControl(_process_filter: *const c_char, _variable_filter: *const c_char) -> c_int |s| { 0 }
    fn DisableRangeControl(_process_filter: *const c_char, _variable_filter: *const c_char) -> c_int |s| { 0 }
    fn WriteFrame(vids: *const c_int, values: *const c_double, n: c_int) -> c_int |s| {
        for (vid, value) in slice(vids, n).iter().zip(slice(values, n)) {
            s.set_vari(*vid, *value);
        }
        0
    }
    fn GetFrame(vids: *const c_int, values: *mut c_double, n: c_int) -> c_int |s| {
        for (vid, value) in slice(vids, n).iter().zip(slice_mut(values, n)) {
            *value = s.get_vari(*vid);
        }
        0
    }
    fn WriteFrameWaitReadFrame(
        write_vids: *const c_int, write_values: *const c_double, write_n: c_int, read_vids: *const c_int, read_values: *mut c_double, read_n: c_int
    ) -> c_int |s| {
        for (vid, value) in slice(write_vids, write_n).iter().zip(slice(write_values, write_n)) {
            s.set_vari(*vid, *value);
        }
        s.cycle_counter += 1;
        for (vid, value) in slice(read_vids, read_n).iter().zip(slice_mut(read_values, read_n)) {
            *value = s.get_vari(*vid);
        }
        0
    }
    fn ReferenceSymbol(
        symbol: *const c_char, display_name: *const c_char, _process: *const c_char, unit: *const c_char, _conversion_type: c_int,
        _conversion: *const c_char, _min: c_double, _max: c_double, _color: c_int, _width: c_int, _prec: c_int, _flags: c_int
    ) -> c_int |s| {
        let display_name = arg(display_name);
        let name = if display_name.is_empty() { arg(symbol) } else { display_name };
        s.add_vari(&name, BbDataType::Double.to_raw(), &arg(unit))
    }
    fn DereferenceSymbol(symbol: *const c_char, _process: *const c_char, _flags: c_int) -> c_int |s| {
        s.remove_vari_by_name(&arg(symbol))
    }
    fn GetRaw(vid: c_int, vari: *mut BbVari) -> c_int |s| {
        let Some(v) = s.variables.get(&vid) else {
            return -1;
        };
        match BbDataType::try_from(v.data_type).and_then(|t| RawValue::from_f64(t, v.value)) {
            Ok(raw) => {
                // @@@@ Unsafe - vari points to a BB_VARI of the caller
                unsafe { *vari = raw.to_vari() };
                v.data_type
            }
            Err(_) => -1,
        }
    }
    fn SetRaw(vid: c_int, data_type: c_int, vari: BbVari, _flags: c_int) -> c_int |s| {
        match BbDataType::try_from(data_type).and_then(|t| RawValue::from_vari(t, vari)) {
            Ok(raw) => s.set_vari(vid, raw.as_f64()),
            Err(_) => -1,
        }
    }

    // Calibration
    fn LoadSvl(_svl_file: *const c_char, process: *const c_char) -> c_int |s| {
        if s.is_running(&arg(process)) { 0 } else { -1 }
    }
    fn SaveSvl(svl_file: *const c_char, process: *const c_char, filter: *const c_char) -> c_int |s| {
        s.last_args = vec![arg(svl_file), arg(process), arg(filter)];
        0
    }
    fn SaveSal(sal_file: *const c_char, process: *const c_char, filter: *const c_char) -> c_int |s| {
        s.last_args = vec![arg(sal_file), arg(process), arg(filter)];
        0
    }
    fn GetSymbolRaw(process: *const c_char, symbol: *const c_char, flags: c_int, vari: *mut BbVari) -> c_int |s| {
        s.last_symbol_flags = flags;
        match s.symbols.get(&(arg(process), arg(symbol))) {
            Some(raw) => {
                // @@@@ Unsafe - vari points to a BB_VARI of the caller
                unsafe { *vari = raw.to_vari() };
                raw.data_type().to_raw()
            }
            None => -1,
        }
    }
    fn SetSymbolRaw(process: *const c_char, symbol: *const c_char, flags: c_int, data_type: c_int, vari: BbVari) -> c_int |s| {
        s.last_symbol_flags = flags;
        match BbDataType::try_from(data_type).and_then(|t| RawValue::from_vari(t, vari)) {
            Ok(raw) => {
                s.symbols.insert((arg(process), arg(symbol)), raw);
                0
            }
            Err(_) => -1,
        }
    }

    // CAN
    fn SetCanChannelCount(_count: c_int) -> c_int |s| { 0 }
    fn SetCanChannelStartupState(_channel: c_int, _state: c_int) -> c_int |s| { 0 }
    fn LoadCanVariante(_file: *const c_char, _channel: c_int) -> c_int |s| { 0 }
    fn LoadAndSelCanVariante(_file: *const c_char, _channel: c_int) -> c_int |s| { 0 }
    fn AppendCanVariante(_file: *const c_char, _channel: c_int) -> c_int |s| { 0 }
    fn DelAllCanVariants() |s| {}
    fn TransmitCAN(
        channel: c_int, id: c_int, ext: c_int, size: c_int, d0: u8, d1: u8, d2: u8, d3: u8, d4: u8, d5: u8, d6: u8, d7: u8
    ) -> c_int |s| {
        let data = [d0, d1, d2, d3, d4, d5, d6, d7];
        let size = (size.max(0) as usize).min(8);
        s.can_sent.push(CanMessage::new(channel as u8, id as u32, ext != 0, &data[..size]));
        0
    }
    fn TransmitCANFd(channel: c_int, id: c_int, ext: c_int, size: c_int, data: *const u8) -> c_int |s| {
        let data = slice(data, size.min(64));
        s.can_sent.push(CanMessage::new(channel as u8, id as u32, ext != 0, data));
        0
    }

    // CCP
    fn LoadCCPConfig(connection: c_int, _file: *const c_char) -> c_int |s| {
        s.protocol_configs.insert(("CCP", connection));
        0
    }
    fn StartCCPBegin(connection: c_int) -> c_int |s| { s.has_protocol_config("CCP", connection) }
    fn StartCCPAddVar(connection: c_int, _label: *const c_char) -> c_int |s| { s.has_protocol_config("CCP", connection) }
    fn StartCCPEnd(connection: c_int) -> c_int |s| { s.has_protocol_config("CCP", connection) }
    fn StopCCP(connection: c_int) -> c_int |s| { s.has_protocol_config("CCP", connection) }
    fn StartCCPCalBegin(connection: c_int) -> c_int |s| { s.has_protocol_config("CCP", connection) }
    fn StartCCPCalAddVar(connection: c_int, _label: *const c_char) -> c_int |s| { s.has_protocol_config("CCP", connection) }
    fn StartCCPCalEnd(connection: c_int) -> c_int |s| { s.has_protocol_config("CCP", connection) }
    fn StopCCPCal(connection: c_int) -> c_int |s| { s.has_protocol_config("CCP", connection) }

    // XCP
    fn LoadXCPConfig(connection: c_int, _file: *const c_char) -> c_int |s| {
        s.protocol_configs.insert(("XCP", connection));
        0
    }
    fn StartXCPBegin(connection: c_int) -> c_int |s| { s.has_protocol_config("XCP", connection) }
    fn StartXCPAddVar(connection: c_int, _label: *const c_char) -> c_int |s| { s.has_protocol_config("XCP", connection) }
    fn StartXCPEnd(connection: c_int) -> c_int |s| { s.has_protocol_config("XCP", connection) }
    fn StopXCP(connection: c_int) -> c_int |s| { s.has_protocol_config("XCP", connection) }
    fn StartXCPCalBegin(connection: c_int) -> c_int |s| { s.has_protocol_config("XCP", connection) }
    fn StartXCPCalAddVar(connection: c_int, _label: *const c_char) -> c_int |s| { s.has_protocol_config("XCP", connection) }
    fn StartXCPCalEnd(connection: c_int) -> c_int |s| { s.has_protocol_config("XCP", connection) }
    fn StopXCPCal(connection: c_int) -> c_int |s| { s.has_protocol_config("XCP", connection) }

    // CAN message queues, transmitted messages are looped back into the receive queue
    fn OpenCANQueue(_depth: c_int) -> c_int |s| {
        s.can_queue_open = true;
        s.can_rx.clear();
        0
    }
    fn OpenCANFdQueue(_depth: c_int, _fd: c_int) -> c_int |s| {
        s.can_queue_open = true;
        s.can_rx.clear();
        0
    }
    fn SetCANAcceptanceWindows(n: c_int, windows: *const CanAcceptMask) -> c_int |s| {
        s.can_windows = slice(windows, n).to_vec();
        0
    }
    fn FlushCANQueue(flags: c_int) -> c_int |s| {
        if flags & 0x1 != 0 {
            s.can_rx.clear();
        }
        0
    }
    fn ReadCANQueue(max: c_int, elements: *mut CanFifoElem) -> c_int |s| {
        if !s.can_queue_open {
            return -1;
        }
        let mut n = 0;
        for element in slice_mut(elements, max) {
            let Some(m) = s.can_rx.pop_front() else { break };
            if let Ok(e) = m.to_fifo_elem() {
                *element = e;
                n += 1;
            }
        }
        n
    }
    fn ReadCANFdQueue(max: c_int, elements: *mut CanFdFifoElem) -> c_int |s| {
        if !s.can_queue_open {
            return -1;
        }
        let mut n = 0;
        for element in slice_mut(elements, max) {
            let Some(m) = s.can_rx.pop_front() else { break };
            if let Ok(e) = m.to_fd_fifo_elem() {
                *element = e;
                n += 1;
            }
        }
        n
    }
    fn TransmitCANQueue(n: c_int, elements: *const CanFifoElem) -> c_int |s| {
        if !s.can_queue_open {
            return -1;
        }
        for e in slice(elements, n) {
            let m = CanMessage::from(e);
            if s.is_accepted(&m) {
                s.can_rx.push_back(m);
            }
        }
        n
    }
    fn TransmitCANFdQueue(n: c_int, elements: *const CanFdFifoElem) -> c_int |s| {
        if !s.can_queue_open {
            return -1;
        }
        for e in slice(elements, n) {
            let m = CanMessage::from(e);
            if s.is_accepted(&m) {
                s.can_rx.push_back(m);
            }
        }
        n
    }
    fn CloseCANQueue() -> c_int |s| {
        s.can_queue_open = false;
        s.can_rx.clear();
        0
    }

    // CAN bit error
    fn SetCanErr(_channel: c_int, _id: c_int, _start_bit: c_int, _size: c_int, _byte_order: *const c_char, _cycles: u32, _value: u64) -> c_int |s| { 0 }
    fn SetCanErrSignalName(_channel: c_int, _id: c_int, _signal: *const c_char, _cycles: u32, _value: u64) -> c_int |s| { 0 }
    fn ClearCanErr() -> c_int |s| { 0 }
    fn SetCanSignalConversion(_channel: c_int, _id: c_int, _signal: *const c_char, _conversion: *const c_char) -> c_int |s| { 0 }
    fn ResetCanSignalConversion(_channel: c_int, _id: c_int, _signal: *const c_char) -> c_int |s| { 0 }
    fn ResetAllCanSignalConversion(_channel: c_int, _id: c_int) -> c_int |s| { 0 }

    // CAN recorder
    fn StartCANRecorder(
        file: *const c_char, trigger: *const c_char, counter: c_int, time_absolute: c_int, time_diff: c_int, time_diff_min_max: c_int,
        n: c_int, _windows: *const CanAcceptMask
    ) -> c_int |s| {
        s.last_args = vec![
            arg(file),
            arg(trigger),
            format!("{} {} {} {}", counter, time_absolute, time_diff, time_diff_min_max),
            n.to_string(),
        ];
        0
    }
    fn StopCANRecorder() -> c_int |s| { 0 }

    // A2L links
    fn SetupLinkToExternProcess(_a2l_file: *const c_char, process: *const c_char, _flags: c_int) -> c_int |s| {
        let process = arg(process);
        if !s.is_running(&process) {
            return -1;
        }
        let link = s.links.len() as i32 + 1;
        s.links.entry(process).or_insert(link);
        0
    }
    fn GetLinkToExternProcess(process: *const c_char) -> c_int |s| { s.links.get(&arg(process)).copied().unwrap_or(-1) }
    fn GetIndexFromLink(link: c_int, label: *const c_char, type_mask: c_int) -> c_int |s| {
        if !s.is_link(link) {
            return -1;
        }
        let label = arg(label);
        s.labels.iter().position(|l| l.label == label && l.label_type() & type_mask != 0).map_or(-1, |i| i as c_int)
    }
    fn GetNextSymbolFromLink(link: c_int, index: c_int, type_mask: c_int, filter: *const c_char, buffer: *mut c_char, max_c: c_int) -> c_int |s| {
        if !s.is_link(link) {
            return -1;
        }
        let filter = arg(filter);
        let start = (index + 1).max(0) as usize;
        let next = s.labels.iter().enumerate().skip(start).find(|(_, l)| l.label_type() & type_mask != 0 && matches_filter(&filter, &l.label));
        match next {
            Some((i, l)) => {
                let buffer = slice_mut(buffer, max_c);
                let n = l.label.len().min(buffer.len().saturating_sub(1));
                for (b, c) in buffer.iter_mut().zip(l.label.bytes().take(n)) {
                    *b = c as c_char;
                }
                if let Some(b) = buffer.get_mut(n) {
                    *b = 0;
                }
                i as c_int
            }
            None => -1,
        }
    }
    fn GetDataFromLink(link: c_int, index: c_int, data: *mut XilEnvLinkData, _flags: c_int, error: *mut *const c_char) -> *mut XilEnvLinkData |s| {
        let template = if s.is_link(link) { s.labels.get(index as usize).cloned() } else { None };
        match template {
            Some(template) if data.is_null() => {
                s.link_data_allocated += 1;
                into_link_data(template)
            }
            Some(template) => {
                *link_data(data) = template;
                data
            }
            None => {
                let message = s.ret(Some(format!("no label with index {} in link {}", index, link)));
                if !error.is_null() {
                    // @@@@ Unsafe - error points to a pointer of the caller
                    unsafe { *error = message };
                }
                std::ptr::null_mut()
            }
        }
    }
    fn SetDataToLink(link: c_int, index: c_int, data: *mut XilEnvLinkData, error: *mut *const c_char) -> c_int |s| {
        if !s.is_link(link) || index < 0 || index as usize >= s.labels.len() {
            let message = s.ret(Some("invalid link or index".to_string()));
            if !error.is_null() {
                // @@@@ Unsafe - error points to a pointer of the caller
                unsafe { *error = message };
            }
            return -1;
        }
        s.labels[index as usize] = link_data(data).clone();
        0
    }
    fn ReferenceMeasurementToBlackboard(link: c_int, index: c_int, _direction: c_int) -> c_int |s| {
        let label = if s.is_link(link) { s.labels.get(index as usize).map(|l| l.label.clone()) } else { None };
        match label {
            Some(label) => {
                s.add_vari(&label, BbDataType::Double.to_raw(), "");
                0
            }
            None => -1,
        }
    }
    fn DereferenceMeasurementFromBlackboard(link: c_int, index: c_int) -> c_int |s| {
        let label = if s.is_link(link) { s.labels.get(index as usize).map(|l| l.label.clone()) } else { None };
        match label {
            Some(label) => s.remove_vari_by_name(&label),
            None => -1,
        }
    }

    // A2L link data helpers
    fn GetLinkDataType(data: *mut XilEnvLinkData) -> c_int |s| { link_data(data).data_type }
    fn GetLinkDataArrayCount(data: *mut XilEnvLinkData) -> c_int |s| { link_data(data).dims.len() as c_int }
    fn GetLinkDataArraySize(data: *mut XilEnvLinkData, an: c_int) -> c_int |s| {
        link_data(data).dims.get(an as usize).map_or(-1, |d| d.iter().product())
    }
    fn CopyLinkData(data: *mut XilEnvLinkData) -> *mut XilEnvLinkData |s| {
        s.link_data_allocated += 1;
        into_link_data(link_data(data).clone())
    }
    fn FreeLinkData(data: *mut XilEnvLinkData) -> *mut XilEnvLinkData |s| {
        if !data.is_null() {
            s.link_data_freed += 1;
            // @@@@ Unsafe - data was created by into_link_data
            drop(unsafe { Box::from_raw(data as *mut FakeLinkData) });
        }
        std::ptr::null_mut()
    }
    fn PrintLinkData(_data: *mut XilEnvLinkData) |s| {}

    // A2L link data single values
    fn GetLinkSingleValueDataType(data: *mut XilEnvLinkData) -> c_int |s| { single_elem(data).elem_type }
    fn GetLinkSingleValueTargetDataType(data: *mut XilEnvLinkData) -> c_int |s| { single_elem(data).target_type }
    fn GetLinkSingleValueFlags(data: *mut XilEnvLinkData) -> u32 |s| { single_elem(data).flags }
    fn GetLinkSingleValueAddress(data: *mut XilEnvLinkData) -> u64 |s| { single_elem(data).address }
    fn GetLinkSingleValueDimensionCount(_data: *mut XilEnvLinkData) -> c_int |s| { 0 }
    fn GetLinkSingleValueDimension(_data: *mut XilEnvLinkData, _dim: c_int) -> c_int |s| { 1 }
    fn GetLinkSingleValueDataDouble(data: *mut XilEnvLinkData) -> c_double |s| { single_elem(data).value.as_f64().unwrap_or(0.0) }
    fn SetLinkSingleValueDataDouble(data: *mut XilEnvLinkData, value: c_double) -> c_int |s| {
        single_elem(data).value = A2lElem::Double(value);
        0
    }
    fn GetLinkSingleValueDataInt(data: *mut XilEnvLinkData) -> i64 |s| { single_elem(data).get_int() }
    fn SetLinkSingleValueDataInt(data: *mut XilEnvLinkData, value: i64) -> c_int |s| {
        single_elem(data).value = A2lElem::Int(value);
        0
    }
    fn GetLinkSingleValueDataUint(data: *mut XilEnvLinkData) -> u64 |s| { single_elem(data).get_uint() }
    fn SetLinkSingleValueDataUint(data: *mut XilEnvLinkData, value: u64) -> c_int |s| {
        single_elem(data).value = A2lElem::Uint(value);
        0
    }
    fn GetLinkSingleValueDataStringPtr(data: *mut XilEnvLinkData) -> *const c_char |s| { single_elem(data).text.as_ptr() }
    fn SetLinkSingleValueDataString(data: *mut XilEnvLinkData, value: *const c_char) -> c_int |s| {
        single_elem(data).set_text(arg(value));
        0
    }
    fn GetLinkSingleValueUnitPtr(data: *mut XilEnvLinkData) -> *const c_char |s| { single_elem(data).unit.as_ptr() }

    // A2L link data arrays
    fn GetLinkArrayValueDataType(data: *mut XilEnvLinkData, an: c_int, i: c_int) -> c_int |s| { array_elem(data, an, i).elem_type }
    fn GetLinkArrayValueTargetDataType(data: *mut XilEnvLinkData, an: c_int, i: c_int) -> c_int |s| { array_elem(data, an, i).target_type }
    fn GetLinkArrayValueFlags(data: *mut XilEnvLinkData, an: c_int, i: c_int) -> u32 |s| { array_elem(data, an, i).flags }
    fn GetLinkArrayValueAddress(data: *mut XilEnvLinkData, an: c_int, i: c_int) -> u64 |s| { array_elem(data, an, i).address }
    fn GetLinkArrayValueDimensionCount(data: *mut XilEnvLinkData, an: c_int) -> c_int |s| {
        link_data(data).dims.get(an as usize).map_or(-1, |d| d.len() as c_int)
    }
    fn GetLinkArrayValueDimension(data: *mut XilEnvLinkData, an: c_int, dim: c_int) -> c_int |s| {
        link_data(data).dims.get(an as usize).and_then(|d| d.get(dim as usize)).copied().unwrap_or(-1)
    }
    fn GetLinkArrayValueDataDouble(data: *mut XilEnvLinkData, an: c_int, i: c_int) -> c_double |s| {
        array_elem(data, an, i).value.as_f64().unwrap_or(0.0)
    }
    fn SetLinkArrayValueDataDouble(data: *mut XilEnvLinkData, an: c_int, i: c_int, value: c_double) -> c_int |s| {
        array_elem(data, an, i).value = A2lElem::Double(value);
        0
    }
    fn GetLinkArrayValueDataInt(data: *mut XilEnvLinkData, an: c_int, i: c_int) -> i64 |s| { array_elem(data, an, i).get_int() }
    fn SetLinkArrayValueDataInt(data: *mut XilEnvLinkData, an: c_int, i: c_int, value: i64) -> c_int |s| {
        array_elem(data, an, i).value = A2lElem::Int(value);
        0
    }
    fn GetLinkArrayValueDataUint(data: *mut XilEnvLinkData, an: c_int, i: c_int) -> u64 |s| { array_elem(data, an, i).get_uint() }
    fn SetLinkArrayValueDataUint(data: *mut XilEnvLinkData, an: c_int, i: c_int, value: u64) -> c_int |s| {
        array_elem(data, an, i).value = A2lElem::Uint(value);
        0
    }
    fn GetLinkArrayValueDataStringPtr(data: *mut XilEnvLinkData, an: c_int, i: c_int) -> *const c_char |s| { array_elem(data, an, i).text.as_ptr() }
    fn SetLinkArrayValueDataString(data: *mut XilEnvLinkData, an: c_int, i: c_int, value: *const c_char) -> c_int |s| {
        array_elem(data, an, i).set_text(arg(value));
        0
    }
    fn GetLinkArrayValueUnitPtr(data: *mut XilEnvLinkData, an: c_int, i: c_int) -> *const c_char |s| { array_elem(data, an, i).unit.as_ptr() }
}

#[cfg(test)]
mod fake_tests {
    use super::*;

    #[test]
    fn test_matches_filter() {
        assert!(matches_filter("*", "XilEnv.CycleCounter"));
        assert!(matches_filter("XilEnv.*", "XilEnv.CycleCounter"));
        assert!(matches_filter("Test?ignal*", "TestSignal1"));
        assert!(!matches_filter("Test*", "CompareSignal1"));
        assert!(!matches_filter("a", "ab"));
    }

    #[test]
    fn test_enum_text() {
        assert_eq!(enum_text("0 0 \"N\"; 1 1 \"1st\";", 1.0).unwrap(), "1st");
        assert_eq!(enum_text("0 0 \"N\"; 1 1 \"1st\";", 2.0), None);
    }

    #[test]
    fn test_all_exports_faked() {
        assert!(fake_functions().missing().is_empty());
    }
}
