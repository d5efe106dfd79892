//-----------------------------------------------------------------------------
// Module scheduler
// Scheduler control, external processes and internal processes (script, recorder, player, equations, generator)

#[allow(unused_imports)]
use log::{debug, error, info, trace, warn};

use std::ffi::CString;

use super::XilEnv;
use crate::error::XilEnvResult;
use crate::rpc::types::A2lLinkFlags;
use crate::rpc::{from_cstr, rpc_call, rpc_status, to_cstring};

//-----------------------------------------------------------------------------
// Process start options

/// Range control settings of an external process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeControl {
    pub before_active_flags: i32,
    pub behind_active_flags: i32,
    pub stop_scheduler: bool,
    pub output: i32,
    /// Blackboard variable counting range errors
    pub error_counter: Option<String>,
    /// Blackboard variable enabling the range control
    pub control_variable: Option<String>,
    pub phys: bool,
    pub limit_values: bool,
}

/// Parameters of XilEnv_StartProcessEx and XilEnv_StartProcessEx2
/// None values are taken from the XilEnv INI file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessStartOptions {
    pub priority: Option<i32>,
    pub cycle: Option<i32>,
    pub delay: Option<i16>,
    pub timeout: Option<i32>,
    pub svl_file: Option<String>,
    /// A2L file to link with the process, uses XilEnv_StartProcessEx2
    pub a2l_file: Option<String>,
    pub a2l_flags: Option<A2lLinkFlags>,
    pub bb_prefix: Option<String>,
    /// None uses the range control settings of the INI file
    pub range_control: Option<RangeControl>,
}

fn opt_cstring(s: &Option<String>) -> XilEnvResult<CString> {
    to_cstring(s.as_deref().unwrap_or(""))
}

impl XilEnv {
    //-------------------------------------------------------------------------
    // Scheduler

    pub fn stop_scheduler(&self) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        rpc_call!(rpc, StopScheduler())
    }

    pub fn continue_scheduler(&self) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        rpc_call!(rpc, ContinueScheduler())
    }

    pub fn is_scheduler_running(&self) -> XilEnvResult<bool> {
        let rpc = self.rpc()?;
        Ok(rpc_status!(rpc, IsSchedulerRunning())? != 0)
    }

    /// Run the given number of cycles while the scheduler is stopped, returns immediately
    pub fn do_next_cycles(&self, cycles: i32) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        rpc_call!(rpc, DoNextCycles(cycles))
    }

    /// Run the given number of cycles while the scheduler is stopped and wait until they are done
    pub fn do_next_cycles_and_wait(&self, cycles: i32) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        debug!("DoNextCyclesAndWait({})", cycles);
        rpc_call!(rpc, DoNextCyclesAndWait(cycles))
    }

    /// Wait until an equation becomes true, at most for the given number of cycles
    /// Returns the remaining cycles, 0 if the equation did not become true
    pub fn wait_until(&self, equation: &str, cycles: i32) -> XilEnvResult<i32> {
        let rpc = self.rpc()?;
        debug!("WaitUntil(\"{}\", {})", equation, cycles);
        let c_equation = to_cstring(equation)?;
        rpc_status!(rpc, WaitUntil(c_equation.as_ptr(), cycles))
    }

    //-------------------------------------------------------------------------
    // External processes

    pub fn start_process(&self, name: &str) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        let name = to_cstring(name)?;
        rpc_status!(rpc, StartProcess(name.as_ptr()))?;
        Ok(())
    }

    pub fn start_process_and_load_svl(&self, name: &str, svl_file: &str) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        let name = to_cstring(name)?;
        let svl_file = to_cstring(svl_file)?;
        rpc_status!(rpc, StartProcessAndLoadSvl(name.as_ptr(), svl_file.as_ptr()))?;
        Ok(())
    }

    /// Start an external process with explicit scheduling, SVL, A2L and range control parameters
    pub fn start_process_ex(&self, name: &str, options: &ProcessStartOptions) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        let c_name = to_cstring(name)?;
        let svl_file = opt_cstring(&options.svl_file)?;
        let bb_prefix = opt_cstring(&options.bb_prefix)?;
        let range_control = options.range_control.clone();
        let use_range_control = range_control.is_some() as i32;
        let range_control = range_control.unwrap_or_default();
        let error_counter = opt_cstring(&range_control.error_counter)?;
        let control_variable = opt_cstring(&range_control.control_variable)?;
        let priority = options.priority.unwrap_or(-1);
        let cycle = options.cycle.unwrap_or(-1);
        let delay = options.delay.unwrap_or(-1);
        let timeout = options.timeout.unwrap_or(-1);

        match &options.a2l_file {
            None => rpc_status!(
                rpc,
                StartProcessEx(
                    c_name.as_ptr(),
                    priority,
                    cycle,
                    delay,
                    timeout,
                    svl_file.as_ptr(),
                    bb_prefix.as_ptr(),
                    use_range_control,
                    range_control.before_active_flags,
                    range_control.behind_active_flags,
                    range_control.stop_scheduler as i32,
                    range_control.output,
                    range_control.error_counter.is_some() as i32,
                    error_counter.as_ptr(),
                    range_control.control_variable.is_some() as i32,
                    control_variable.as_ptr(),
                    range_control.phys as i32,
                    range_control.limit_values as i32,
                )
            )?,
            Some(a2l_file) => {
                let a2l_file = to_cstring(a2l_file)?;
                let a2l_flags = options.a2l_flags.unwrap_or(A2lLinkFlags::empty());
                rpc_status!(
                    rpc,
                    StartProcessEx2(
                        c_name.as_ptr(),
                        priority,
                        cycle,
                        delay,
                        timeout,
                        svl_file.as_ptr(),
                        a2l_file.as_ptr(),
                        a2l_flags.bits(),
                        bb_prefix.as_ptr(),
                        use_range_control,
                        range_control.before_active_flags,
                        range_control.behind_active_flags,
                        range_control.stop_scheduler as i32,
                        range_control.output,
                        range_control.error_counter.is_some() as i32,
                        error_counter.as_ptr(),
                        range_control.control_variable.is_some() as i32,
                        control_variable.as_ptr(),
                        range_control.phys as i32,
                        range_control.limit_values as i32,
                    )
                )?
            }
        };
        info!("Started process {}", name);
        Ok(())
    }

    pub fn stop_process(&self, name: &str) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        let name = to_cstring(name)?;
        rpc_status!(rpc, StopProcess(name.as_ptr()))?;
        Ok(())
    }

    /// Iterate the running processes matching filter, first restarts the iteration
    /// None after the last process
    pub fn get_next_process(&self, first: bool, filter: &str) -> XilEnvResult<Option<String>> {
        let rpc = self.rpc()?;
        let filter = to_cstring(filter)?;
        let p = rpc_call!(rpc, GetNextProcess(first as i32, filter.as_ptr()))?;
        Ok(from_cstr(p))
    }

    /// Names of all running processes matching filter
    pub fn get_processes(&self, filter: &str) -> XilEnvResult<Vec<String>> {
        let mut processes = Vec::new();
        let mut next = self.get_next_process(true, filter)?;
        while let Some(name) = next {
            processes.push(name);
            next = self.get_next_process(false, filter)?;
        }
        Ok(processes)
    }

    pub fn get_process_state(&self, name: &str) -> XilEnvResult<i32> {
        let rpc = self.rpc()?;
        let name = to_cstring(name)?;
        rpc_status!(rpc, GetProcessState(name.as_ptr()))
    }

    //-------------------------------------------------------------------------
    // Equations before and behind processes

    pub fn add_before_process_equation_from_file(&self, nr: i32, process: &str, equ_file: &str) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        let process = to_cstring(process)?;
        let equ_file = to_cstring(equ_file)?;
        rpc_status!(rpc, AddBeforeProcessEquationFromFile(nr, process.as_ptr(), equ_file.as_ptr()))?;
        Ok(())
    }

    pub fn add_behind_process_equation_from_file(&self, nr: i32, process: &str, equ_file: &str) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        let process = to_cstring(process)?;
        let equ_file = to_cstring(equ_file)?;
        rpc_status!(rpc, AddBehindProcessEquationFromFile(nr, process.as_ptr(), equ_file.as_ptr()))?;
        Ok(())
    }

    pub fn del_before_process_equations(&self, nr: i32, process: &str) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        let process = to_cstring(process)?;
        rpc_call!(rpc, DelBeforeProcessEquations(nr, process.as_ptr()))
    }

    pub fn del_behind_process_equations(&self, nr: i32, process: &str) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        let process = to_cstring(process)?;
        rpc_call!(rpc, DelBehindProcessEquations(nr, process.as_ptr()))
    }

    //-------------------------------------------------------------------------
    // Internal processes

    pub fn start_script(&self, script_file: &str) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        let script_file = to_cstring(script_file)?;
        rpc_status!(rpc, StartScript(script_file.as_ptr()))?;
        Ok(())
    }

    pub fn stop_script(&self) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        rpc_status!(rpc, StopScript())?;
        Ok(())
    }

    /// Start the trace recorder with a recorder configuration file (.cfg)
    pub fn start_recorder(&self, cfg_file: &str) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        let c_cfg_file = to_cstring(cfg_file)?;
        rpc_status!(rpc, StartRecorder(c_cfg_file.as_ptr()))?;
        info!("Recorder started with {}", cfg_file);
        Ok(())
    }

    pub fn stop_recorder(&self) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        rpc_status!(rpc, StopRecorder())?;
        Ok(())
    }

    pub fn recorder_add_comment(&self, comment: &str) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        let comment = to_cstring(comment)?;
        rpc_status!(rpc, RecorderAddComment(comment.as_ptr()))?;
        Ok(())
    }

    /// Start the stimulus player with a player configuration file (.cfg)
    pub fn start_player(&self, cfg_file: &str) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        let c_cfg_file = to_cstring(cfg_file)?;
        rpc_status!(rpc, StartPlayer(c_cfg_file.as_ptr()))?;
        info!("Player started with {}", cfg_file);
        Ok(())
    }

    pub fn stop_player(&self) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        rpc_status!(rpc, StopPlayer())?;
        Ok(())
    }

    /// Start the equation calculator with an equation file (.equ)
    pub fn start_equations(&self, equ_file: &str) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        let equ_file = to_cstring(equ_file)?;
        rpc_status!(rpc, StartEquations(equ_file.as_ptr()))?;
        Ok(())
    }

    pub fn stop_equations(&self) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        rpc_status!(rpc, StopEquations())?;
        Ok(())
    }

    /// Start the signal generator with a generator file (.gen)
    pub fn start_generator(&self, gen_file: &str) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        let gen_file = to_cstring(gen_file)?;
        rpc_status!(rpc, StartGenerator(gen_file.as_ptr()))?;
        Ok(())
    }

    pub fn stop_generator(&self) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        rpc_status!(rpc, StopGenerator())?;
        Ok(())
    }
}
