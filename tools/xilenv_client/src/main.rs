//-----------------------------------------------------------------------------
// xilenv_client - XilEnv command line tool
//
// - Start XilEnv with an INI file or connect to a running instance
// - List blackboard variables with regex patterns
// - Read and write blackboard variables, evaluate equations
// - Print measurements and characteristics of external processes through their A2L link
// - Execute the recorder and stimulus player test sequence
//
// xilenv_client --help
//-----------------------------------------------------------------------------

use std::path::PathBuf;

use anyhow::{anyhow, Context};
use regex::Regex;

use xilenv::{A2lGetFlags, A2lLabelType, XilEnv, XilEnvConfig};

use recorder_test::recorder_test;

//-----------------------------------------------------------------------------
// Command line arguments

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "xilenv_client")]
#[command(about = concat!("XilEnv client v", env!("CARGO_PKG_VERSION"), " for remote control of OpenXilEnv"))]
#[command(long_about = concat!("XilEnv client v", env!("CARGO_PKG_VERSION"), " for remote control of OpenXilEnv.

This tool can:
- Start XilEnv with an INI file or connect to a running instance
- List blackboard variables with regex patterns
- Read and write blackboard variables, evaluate equations
- Print values of external processes through their A2L link
- Execute the recorder and stimulus player test sequence

Examples:
  xilenv_client --install-path /opt/openxilenv --ini sample.ini --list \"XilEnv\\..*\"
  xilenv_client --read XilEnv.CycleCounter XilEnv.SampleFrequency
  xilenv_client --write AcceleratorPosition 50
  xilenv_client --equ \"XilEnv.CycleCounter * 2\"
  xilenv_client --a2l-process ExtProc_Sample --a2l-label ampl
  xilenv_client --ini sample.ini --test --close"))]
#[command(version)]
struct Args {
    // -l --log-level
    /// Log level (Off=0, Error=1, Warn=2, Info=3, Debug=4, Trace=5)
    #[arg(short, long, default_value_t = 3)]
    log_level: u8,

    // -p --install-path
    /// XilEnv installation directory, default is the environment variable XILENV_INSTALL_PATH
    #[arg(short = 'p', long)]
    install_path: Option<PathBuf>,

    // -c --config
    /// Session configuration json file
    #[arg(short, long)]
    config: Option<PathBuf>,

    // -i --ini
    /// Start XilEnv with this INI file, otherwise connect to a running XilEnv
    #[arg(short, long)]
    ini: Option<PathBuf>,

    // --gui
    /// Start XilEnv with its GUI
    #[arg(long, default_value_t = false)]
    gui: bool,

    // -t --timeout
    /// Timeout of start and connect in s
    #[arg(short, long)]
    timeout: Option<u64>,

    // -a --address
    /// Address of a running XilEnv, empty for the local host
    #[arg(short, long)]
    address: Option<String>,

    // --instance
    /// Instance name of a running XilEnv
    #[arg(long)]
    instance: Option<String>,

    // --list
    /// List all blackboard variables matching a regular expression
    #[arg(long, default_value = "")]
    list: String,

    // -r --read
    /// Read blackboard variables (list of names separated by space)
    #[arg(short, long, value_delimiter = ' ', num_args = 1..)]
    read: Vec<String>,

    // -w --write
    /// Write a blackboard variable (format: "variable_name value")
    #[arg(short, long, value_names = ["NAME", "VALUE"], num_args = 2)]
    write: Vec<String>,

    // -e --equ
    /// Evaluate an equation in XilEnv
    #[arg(short, long, default_value = "")]
    equ: String,

    // --a2l-process
    /// External process with an A2L link
    #[arg(long, default_value = "")]
    a2l_process: String,

    // --a2l-label
    /// Print value and unit of this label of the A2L link of --a2l-process
    #[arg(long, default_value = "")]
    a2l_label: String,

    /// --test
    /// Execute the recorder and stimulus player test sequence
    #[arg(long, default_value_t = false)]
    test: bool,

    /// --close
    /// Disconnect and close XilEnv at exit
    #[arg(long, default_value_t = false)]
    close: bool,
}

//----------------------------------------------------------------------------------------------
// Logging

#[allow(unused_imports)]
use log::{debug, error, info, trace, warn};

trait ToLogLevelFilter {
    fn to_log_level_filter(self) -> log::LevelFilter;
}

impl ToLogLevelFilter for u8 {
    fn to_log_level_filter(self) -> log::LevelFilter {
        match self {
            0 => log::LevelFilter::Off,
            1 => log::LevelFilter::Error,
            2 => log::LevelFilter::Warn,
            3 => log::LevelFilter::Info,
            4 => log::LevelFilter::Debug,
            5 => log::LevelFilter::Trace,
            _ => log::LevelFilter::Warn,
        }
    }
}

//------------------------------------------------------------------------
// Session configuration from the config file and the command line

fn session_config(args: &Args) -> anyhow::Result<XilEnvConfig> {
    let mut config = match &args.config {
        Some(path) => XilEnvConfig::load_json(path).with_context(|| format!("Failed to load configuration {}", path.display()))?,
        None => XilEnvConfig::default(),
    };
    if let Some(install_path) = &args.install_path {
        config.install_path = Some(install_path.clone());
    }
    if let Some(timeout) = args.timeout {
        config.connect_timeout_s = timeout;
    }
    if let Some(address) = &args.address {
        config.address = address.clone();
    }
    if args.instance.is_some() {
        config.instance = args.instance.clone();
    }
    Ok(config)
}

//------------------------------------------------------------------------
//  XilEnv client

fn xilenv_client(args: &Args) -> anyhow::Result<()> {
    let config = session_config(args)?;
    let mut xil = XilEnv::new(config)?;
    info!("XilEnvRpc {} API version 0x{:X}", xil.get_library().get_path().display(), xil.get_api_version()?);

    // Start or connect
    match &args.ini {
        Some(ini) => {
            let timeout_s = xil.get_config().connect_timeout_s;
            xil.start(ini, args.gui, timeout_s)?;
            info!("Started XilEnv with {}", ini.display());
        }
        None => {
            xil.connect()?;
        }
    }
    info!("XilEnv version {}", xil.get_version()?);

    // Print all blackboard variables matching the regex
    if !args.list.is_empty() {
        let regex = Regex::new(&args.list)?;
        println!();
        println!("Blackboard variables:");
        let variables: Vec<String> = xil.get_variables("*")?.into_iter().filter(|name| regex.is_match(name)).collect();
        if variables.is_empty() {
            println!(" None");
        }
        for name in &variables {
            let vid = xil.attach_vari(name)?;
            let value = xil.get(vid)?;
            println!(" {} = {} {} ({})", name, value, xil.get_vari_unit(vid)?, xil.get_vari_type(vid)?);
            xil.remove_vari(vid)?;
        }
        println!();
    }

    // Read variables
    if !args.read.is_empty() {
        let names: Vec<&str> = args.read.iter().map(|s| s.as_str()).collect();
        let n = xil.attach_variables(&names)?;
        if n != names.len() {
            warn!("{} of {} variables not found", names.len() - n, names.len());
        }
        for name in names.iter().filter(|name| xil.is_attached(name)) {
            println!(" {} = {}", name, xil.read_signal(name)?);
        }
    }

    // Write a variable
    if !args.write.is_empty() {
        if args.write.len() != 2 {
            return Err(anyhow!("Write requires exactly 2 arguments: variable name and value"));
        }
        let name = &args.write[0];
        let value: f64 = args.write[1].parse().with_context(|| format!("Failed to parse '{}' as a double value", args.write[1]))?;
        xil.attach_variables(&[name.as_str()])?;
        xil.write_signal(name, value)?;
        info!("Successfully set '{}' = {}", name, value);
        println!("Ok");
    }

    // Evaluate an equation
    if !args.equ.is_empty() {
        println!(" {} = {}", args.equ, xil.equ(&args.equ)?);
    }

    // Print a label of an A2L link
    if !args.a2l_label.is_empty() {
        if args.a2l_process.is_empty() {
            return Err(anyhow!("--a2l-label requires --a2l-process"));
        }
        let link = xil.get_link_to_extern_process(&args.a2l_process)?;
        let data = xil.fetch_a2l_data(link, &args.a2l_label, A2lGetFlags::PHYS | A2lGetFlags::TEXT_REPLACE, A2lLabelType::ALL)?;
        println!(" {} ({:?}) = {}", data.get_label(), data.get_data_type()?, data.get_value()?);
        println!(" unit: {}", data.get_unit()?);
    }

    // Recorder and stimulus player test sequence
    if args.test {
        let error_counter = recorder_test(&mut xil)?;
        if error_counter == 0.0 {
            info!("Recorder and player test passed");
        } else {
            error!("Recorder and player test failed, ErrorCounter = {}", error_counter);
        }
    }

    // Disconnect
    if args.close {
        match xil.disconnect_and_close_xil()? {
            Some(status) => info!("XilEnv closed with {}", status),
            None => {
                xil.remove_attached_variables();
                xil.disconnect_and_close(None)?;
                info!("XilEnv closed");
            }
        }
    } else if xil.is_connected() {
        xil.remove_attached_variables();
        xil.disconnect_from()?;
        info!("XilEnv disconnected");
    }

    Ok(())
}

//------------------------------------------------------------------------
// Main function

fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    let log_level = args.log_level.to_log_level_filter();
    env_logger::Builder::new()
        .target(env_logger::Target::Stdout)
        .filter_level(log_level)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .init();

    info!("xilenv_client");
    if let Err(e) = xilenv_client(&args) {
        error!("XilEnv client failed, Error: {}", e);
        return Err(e);
    }
    Ok(())
}
