//-----------------------------------------------------------------------------
// Module automation
// Test automation on top of the session: start the engine, attach signals by name,
// wait in simulated time

#[allow(unused_imports)]
use log::{debug, error, info, trace, warn};

use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use std::time::Duration;

use super::XilEnv;
use crate::config::SAMPLE_FREQUENCY_VARIABLE;
use crate::error::{XilEnvError, XilEnvResult};
use crate::rpc::PlatformFiles;

const CONNECT_RETRY_INTERVAL: Duration = Duration::from_secs(1);

impl XilEnv {
    //-------------------------------------------------------------------------
    // Start and connect

    /// Start XilEnv with its GUI and connect to it
    pub fn start_with_gui<P: AsRef<Path>>(&mut self, ini_file: P) -> XilEnvResult<()> {
        let timeout_s = self.config.connect_timeout_s;
        self.start(ini_file.as_ref(), true, timeout_s)
    }

    /// Start XilEnv without GUI and connect to it
    pub fn start_without_gui<P: AsRef<Path>>(&mut self, ini_file: P) -> XilEnvResult<()> {
        let timeout_s = self.config.connect_timeout_s;
        self.start(ini_file.as_ref(), false, timeout_s)
    }

    /// Spawn the XilEnv executable with an INI file, connect within timeout_s seconds
    /// and attach the default variables
    pub fn start(&mut self, ini_file: &Path, gui: bool, timeout_s: u64) -> XilEnvResult<()> {
        if self.connected {
            return Err(XilEnvError::AlreadyConnected);
        }
        self.reap_process()?;
        let executable = self.find_executable(gui)?;

        let mut command = Command::new(&executable);
        command.arg("-ini").arg(ini_file);
        if !gui {
            command.arg("-nogui");
        }
        let mut child = command.stdout(Stdio::piped()).stderr(Stdio::piped()).spawn()?;
        info!("Started {} -ini {} (pid {})", executable.display(), ini_file.display(), child.id());
        let forwarded = forward_output(child.stdout.take(), log::Level::Debug).and_then(|()| forward_output(child.stderr.take(), log::Level::Warn));
        self.process = Some(child);

        if let Err(e) = forwarded.and_then(|()| self.connect_with_retry(timeout_s)) {
            error!("Could not connect to XilEnv: {}", e);
            if let Some(mut child) = self.process.take() {
                child.kill().ok();
                child.wait().ok();
            }
            return Err(e);
        }

        std::thread::sleep(self.config.get_startup_delay());
        self.attach_default_variables()?;
        Ok(())
    }

    // The console engine, or the GUI executable with -nogui if the installation has no console engine
    fn find_executable(&self, gui: bool) -> XilEnvResult<PathBuf> {
        let files = PlatformFiles::host()?;
        let install_path = self.config.get_install_path()?;
        let executable = install_path.join(if gui { files.gui_executable } else { files.executable });
        if executable.is_file() {
            return Ok(executable);
        }
        if !gui {
            let gui_executable = install_path.join(files.gui_executable);
            if gui_executable.is_file() {
                debug!("{} not found, using {} -nogui", executable.display(), gui_executable.display());
                return Ok(gui_executable);
            }
        }
        error!("XilEnv executable {} not found", executable.display());
        Err(XilEnvError::ExecutableNotFound(executable))
    }

    // An engine started before by this session must have terminated
    fn reap_process(&mut self) -> XilEnvResult<()> {
        if let Some(child) = self.process.as_mut() {
            let pid = child.id();
            match child.try_wait()? {
                Some(status) => info!("XilEnv process {} terminated with {}", pid, status),
                None => {
                    warn!("XilEnv process {} is still running", pid);
                    return Err(XilEnvError::AlreadyStarted(pid));
                }
            }
            self.process = None;
        }
        Ok(())
    }

    /// Connect to the configured address and instance, attach the default variables
    pub fn connect(&mut self) -> XilEnvResult<()> {
        self.connect_configured()?;
        self.attach_default_variables()?;
        Ok(())
    }

    fn connect_configured(&mut self) -> XilEnvResult<()> {
        let address = self.config.address.clone();
        match self.config.instance.clone() {
            Some(instance) => self.connect_to_instance(&address, &instance),
            None => self.connect_to(&address),
        }
    }

    /// Try to connect once per second, at least once
    pub fn connect_with_retry(&mut self, timeout_s: u64) -> XilEnvResult<()> {
        let attempts = timeout_s.max(1);
        for attempt in 1..=attempts {
            match self.connect_configured() {
                Ok(()) => {
                    debug!("Connected after {} attempts", attempt);
                    return Ok(());
                }
                Err(XilEnvError::AlreadyConnected) => return Err(XilEnvError::AlreadyConnected),
                Err(e) => debug!("Connect attempt {} failed: {}", attempt, e),
            }
            if attempt < attempts {
                std::thread::sleep(CONNECT_RETRY_INTERVAL);
            }
        }
        Err(XilEnvError::ConnectTimeout { timeout_s })
    }

    /// Returns the exit status of the engine process, None if this session did not start it
    pub fn disconnect_and_close_xil(&mut self) -> XilEnvResult<Option<ExitStatus>> {
        if self.process.is_none() {
            debug!("XilEnv was not started by this session");
            return Ok(None);
        }
        self.remove_attached_variables();
        self.disconnect_and_close(None)?;
        match self.process.take() {
            Some(mut child) => {
                let status = child.wait()?;
                info!("XilEnv terminated with {}", status);
                Ok(Some(status))
            }
            None => Ok(None),
        }
    }

    //-------------------------------------------------------------------------
    // Attached variables

    pub fn attach_default_variables(&mut self) -> XilEnvResult<usize> {
        let names = self.config.default_variables.clone();
        let names: Vec<&str> = names.iter().map(|s| s.as_str()).collect();
        self.attach_variables(&names)
    }

    /// Attach variables by name, unknown variables are skipped with a warning
    /// Returns the number of attached variables
    pub fn attach_variables(&mut self, names: &[&str]) -> XilEnvResult<usize> {
        let mut count = 0;
        for name in names {
            match self.attach_vari(name) {
                Ok(vid) => {
                    debug!("Attached {} vid={}", name, vid);
                    self.attached.insert(name.to_string(), vid);
                    count += 1;
                }
                Err(XilEnvError::VariableNotFound(_)) => warn!("Could not attach variable {}", name),
                Err(e) => return Err(e),
            }
        }
        Ok(count)
    }

    /// Variable id of an attached variable
    pub fn get_attached(&self, name: &str) -> XilEnvResult<i32> {
        self.attached.get(name).copied().ok_or_else(|| XilEnvError::NotAttached(name.to_string()))
    }

    pub fn is_attached(&self, name: &str) -> bool {
        self.attached.contains_key(name)
    }

    /// Remove all attached variables from the blackboard
    pub fn remove_attached_variables(&mut self) {
        for (name, vid) in std::mem::take(&mut self.attached) {
            if let Err(e) = self.remove_vari(vid) {
                warn!("Could not remove variable {}: {}", name, e);
            }
        }
    }

    fn get_attached_list(&self, names: &[&str]) -> XilEnvResult<Vec<i32>> {
        names.iter().map(|name| self.get_attached(name)).collect()
    }

    //-------------------------------------------------------------------------
    // Signals

    pub fn read_signal(&self, name: &str) -> XilEnvResult<f64> {
        self.get(self.get_attached(name)?)
    }

    pub fn read_signals(&self, names: &[&str]) -> XilEnvResult<Vec<f64>> {
        let vids = self.get_attached_list(names)?;
        self.get_frame(&vids)
    }

    pub fn write_signal(&self, name: &str, value: f64) -> XilEnvResult<()> {
        self.set(self.get_attached(name)?, value)
    }

    pub fn write_signals(&self, names: &[&str], values: &[f64]) -> XilEnvResult<()> {
        if names.len() != values.len() {
            return Err(XilEnvError::LengthMismatch {
                left: names.len(),
                right: values.len(),
            });
        }
        let vids = self.get_attached_list(names)?;
        self.write_frame(&vids, values)
    }

    //-------------------------------------------------------------------------
    // Simulated time

    /// Number of scheduler cycles in a time span, from the sample frequency of XilEnv
    pub fn seconds_to_cycles(&self, seconds: f64) -> XilEnvResult<i32> {
        let sample_frequency = self.read_signal(SAMPLE_FREQUENCY_VARIABLE)?;
        Ok((seconds * sample_frequency) as i32)
    }

    /// Run the scheduler for a time span of simulated time
    pub fn wait_seconds(&self, seconds: f64) -> XilEnvResult<()> {
        let cycles = self.seconds_to_cycles(seconds)?;
        debug!("Wait {}s = {} cycles", seconds, cycles);
        self.stop_scheduler()?;
        let result = self.do_next_cycles_and_wait(cycles);
        self.continue_scheduler()?;
        result
    }

    /// Wait until value - tolerance <= signal <= value + tolerance, returns the remaining cycles
    pub fn wait_until_value_almost_match(&self, name: &str, value: f64, seconds: f64, tolerance: f64) -> XilEnvResult<i32> {
        let equation = format!("{} >= {} && {} <= {}", name, value - tolerance, name, value + tolerance);
        self.wait_until(&equation, self.seconds_to_cycles(seconds)?)
    }

    pub fn wait_until_value_is_greater(&self, name: &str, value: f64, seconds: f64) -> XilEnvResult<i32> {
        let equation = format!("{} > {}", name, value);
        self.wait_until(&equation, self.seconds_to_cycles(seconds)?)
    }

    pub fn wait_until_value_is_smaller(&self, name: &str, value: f64, seconds: f64) -> XilEnvResult<i32> {
        let equation = format!("{} < {}", name, value);
        self.wait_until(&equation, self.seconds_to_cycles(seconds)?)
    }

    pub fn wait_until_value_match(&self, name: &str, value: f64, seconds: f64) -> XilEnvResult<i32> {
        let equation = format!("{} == {}", name, value);
        self.wait_until(&equation, self.seconds_to_cycles(seconds)?)
    }

    //-------------------------------------------------------------------------
    // Real time

    /// Limit the simulation to real time
    pub fn enable_real_time_factor_switch(&self) -> XilEnvResult<()> {
        self.switch_real_time_factor("Yes")
    }

    /// Run the simulation as fast as possible
    pub fn disable_real_time_factor_switch(&self) -> XilEnvResult<()> {
        self.switch_real_time_factor("No")
    }

    fn switch_real_time_factor(&self, setting: &str) -> XilEnvResult<()> {
        self.stop_scheduler()?;
        let result = self.change_settings("NOT_FASTER_THAN_REALTIME", setting);
        self.continue_scheduler()?;
        result
    }
}

//-----------------------------------------------------------------------------
// Console output of the engine

// Forward the lines of a pipe of the engine process to the log until the engine closes it
// The engine blocks when a pipe buffer is full, so each pipe needs a reader
fn forward_output<R: Read + Send + 'static>(pipe: Option<R>, level: log::Level) -> XilEnvResult<()> {
    let Some(pipe) = pipe else {
        return Ok(());
    };
    std::thread::Builder::new().name("xilenv_output".to_string()).spawn(move || {
        let mut reader = BufReader::new(pipe);
        let mut line = Vec::new();
        loop {
            line.clear();
            match reader.read_until(b'\n', &mut line) {
                Ok(0) => break,
                Ok(_) => log::log!(level, "XilEnv: {}", String::from_utf8_lossy(&line).trim_end()),
                Err(e) => {
                    debug!("XilEnv output closed: {}", e);
                    break;
                }
            }
        }
    })?;
    Ok(())
}
