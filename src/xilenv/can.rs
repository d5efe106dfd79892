//-----------------------------------------------------------------------------
// Module can
// CAN variants, single frame transmit, message queues, bit errors and the CAN recorder

#[allow(unused_imports)]
use log::{debug, error, info, trace, warn};

use super::XilEnv;
use crate::error::{XilEnvError, XilEnvResult};
use crate::rpc::types::{CanAcceptMask, CanFdFifoElem, CanFifoElem, FlushCanQueue};
use crate::rpc::{rpc_call, rpc_name, rpc_status, to_cstring};

//-----------------------------------------------------------------------------
// CanMessage

/// A CAN or CAN FD message of the XilEnv message queues
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CanMessage {
    pub id: u32,
    /// 29 bit identifier
    pub ext: bool,
    pub channel: u8,
    /// Set for messages sent by XilEnv itself
    pub node: u8,
    pub timestamp: u64,
    pub data: Vec<u8>,
}

impl CanMessage {
    pub fn new(channel: u8, id: u32, ext: bool, data: &[u8]) -> CanMessage {
        CanMessage {
            id,
            ext,
            channel,
            node: 0,
            timestamp: 0,
            data: data.to_vec(),
        }
    }

    pub(crate) fn to_fifo_elem(&self) -> XilEnvResult<CanFifoElem> {
        if self.data.len() > 8 {
            return Err(XilEnvError::LengthMismatch { left: 8, right: self.data.len() });
        }
        let mut data = [0u8; 8];
        data[..self.data.len()].copy_from_slice(&self.data);
        Ok(CanFifoElem {
            id: self.id,
            size: self.data.len() as u8,
            ext: self.ext as u8,
            channel: self.channel,
            data,
            ..Default::default()
        })
    }

    pub(crate) fn to_fd_fifo_elem(&self) -> XilEnvResult<CanFdFifoElem> {
        if self.data.len() > 64 {
            return Err(XilEnvError::LengthMismatch { left: 64, right: self.data.len() });
        }
        let mut data = [0u8; 64];
        data[..self.data.len()].copy_from_slice(&self.data);
        Ok(CanFdFifoElem {
            id: self.id,
            size: self.data.len() as u8,
            ext: self.ext as u8,
            channel: self.channel,
            data,
            ..Default::default()
        })
    }
}

impl From<&CanFifoElem> for CanMessage {
    fn from(e: &CanFifoElem) -> Self {
        let data = e.data;
        let size = (e.size as usize).min(8);
        CanMessage {
            id: e.id,
            ext: e.ext != 0,
            channel: e.channel,
            node: e.node,
            timestamp: e.timestamp,
            data: data[..size].to_vec(),
        }
    }
}

impl From<&CanFdFifoElem> for CanMessage {
    fn from(e: &CanFdFifoElem) -> Self {
        let data = e.data;
        let size = (e.size as usize).min(64);
        CanMessage {
            id: e.id,
            ext: e.ext != 0,
            channel: e.channel,
            node: e.node,
            timestamp: e.timestamp,
            data: data[..size].to_vec(),
        }
    }
}

//-----------------------------------------------------------------------------
// CAN recorder options

/// Display columns and trigger of the CAN recorder
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CanRecorderOptions {
    /// Equation starting the recording, empty records immediately
    pub trigger: String,
    pub column_counter: bool,
    pub column_time_absolute: bool,
    pub column_time_diff: bool,
    pub column_time_diff_min_max: bool,
}

impl XilEnv {
    //-------------------------------------------------------------------------
    // Channels and variants

    pub fn set_can_channel_count(&self, channel_count: i32) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        rpc_status!(rpc, SetCanChannelCount(channel_count))?;
        Ok(())
    }

    pub fn set_can_channel_startup_state(&self, channel: i32, state: i32) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        rpc_status!(rpc, SetCanChannelStartupState(channel, state))?;
        Ok(())
    }

    pub fn load_can_variante(&self, can_file: &str, channel: i32) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        let c_can_file = to_cstring(can_file)?;
        rpc_status!(rpc, LoadCanVariante(c_can_file.as_ptr(), channel))?;
        info!("Loaded CAN variant {} on channel {}", can_file, channel);
        Ok(())
    }

    pub fn load_and_sel_can_variante(&self, can_file: &str, channel: i32) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        let c_can_file = to_cstring(can_file)?;
        rpc_status!(rpc, LoadAndSelCanVariante(c_can_file.as_ptr(), channel))?;
        info!("Selected CAN variant {} on channel {}", can_file, channel);
        Ok(())
    }

    pub fn append_can_variante(&self, can_file: &str, channel: i32) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        let can_file = to_cstring(can_file)?;
        rpc_status!(rpc, AppendCanVariante(can_file.as_ptr(), channel))?;
        Ok(())
    }

    pub fn del_all_can_variants(&self) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        rpc_call!(rpc, DelAllCanVariants())
    }

    //-------------------------------------------------------------------------
    // Single frames

    /// Transmit one classic CAN frame, up to 8 data bytes
    pub fn transmit_can(&self, channel: i32, id: u32, ext: bool, data: &[u8]) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        if data.len() > 8 {
            return Err(XilEnvError::LengthMismatch { left: 8, right: data.len() });
        }
        let mut d = [0u8; 8];
        d[..data.len()].copy_from_slice(data);
        rpc_status!(
            rpc,
            TransmitCAN(channel, id as i32, ext as i32, data.len() as i32, d[0], d[1], d[2], d[3], d[4], d[5], d[6], d[7])
        )?;
        Ok(())
    }

    /// Transmit one CAN FD frame, up to 64 data bytes
    pub fn transmit_can_fd(&self, channel: i32, id: u32, ext: bool, data: &[u8]) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        if data.len() > 64 {
            return Err(XilEnvError::LengthMismatch { left: 64, right: data.len() });
        }
        let mut d = [0u8; 64];
        d[..data.len()].copy_from_slice(data);
        rpc_status!(rpc, TransmitCANFd(channel, id as i32, ext as i32, data.len() as i32, d.as_ptr()))?;
        Ok(())
    }

    //-------------------------------------------------------------------------
    // Message queues

    /// Open the CAN message queue with depth elements
    pub fn open_can_queue(&self, depth: i32) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        rpc_status!(rpc, OpenCANQueue(depth))?;
        debug!("Opened CAN queue, depth {}", depth);
        Ok(())
    }

    pub fn open_can_fd_queue(&self, depth: i32, fd: bool) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        rpc_status!(rpc, OpenCANFdQueue(depth, fd as i32))?;
        debug!("Opened CAN FD queue, depth {}", depth);
        Ok(())
    }

    /// Only messages inside one of the windows are stored in the receive queue
    pub fn set_can_acceptance_windows(&self, windows: &[CanAcceptMask]) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        rpc_status!(rpc, SetCANAcceptanceWindows(windows.len() as i32, windows.as_ptr()))?;
        Ok(())
    }

    pub fn flush_can_queue(&self, flags: FlushCanQueue) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        rpc_status!(rpc, FlushCANQueue(flags.bits()))?;
        Ok(())
    }

    /// Read up to max messages from the receive queue
    pub fn read_can_queue(&self, max: usize) -> XilEnvResult<Vec<CanMessage>> {
        let rpc = self.rpc()?;
        let mut elements = vec![CanFifoElem::default(); max];
        let n = rpc_status!(rpc, ReadCANQueue(max as i32, elements.as_mut_ptr()))? as usize;
        Ok(elements[..n.min(max)].iter().map(CanMessage::from).collect())
    }

    pub fn read_can_fd_queue(&self, max: usize) -> XilEnvResult<Vec<CanMessage>> {
        let rpc = self.rpc()?;
        let mut elements = vec![CanFdFifoElem::default(); max];
        let n = rpc_status!(rpc, ReadCANFdQueue(max as i32, elements.as_mut_ptr()))? as usize;
        Ok(elements[..n.min(max)].iter().map(CanMessage::from).collect())
    }

    /// Transmit messages through the queue, returns the number of messages accepted
    pub fn transmit_can_queue(&self, messages: &[CanMessage]) -> XilEnvResult<usize> {
        let rpc = self.rpc()?;
        let elements = messages.iter().map(|m| m.to_fifo_elem()).collect::<XilEnvResult<Vec<_>>>()?;
        let n = rpc_status!(rpc, TransmitCANQueue(elements.len() as i32, elements.as_ptr()))?;
        Ok(n as usize)
    }

    pub fn transmit_can_fd_queue(&self, messages: &[CanMessage]) -> XilEnvResult<usize> {
        let rpc = self.rpc()?;
        let elements = messages.iter().map(|m| m.to_fd_fifo_elem()).collect::<XilEnvResult<Vec<_>>>()?;
        let n = rpc_status!(rpc, TransmitCANFdQueue(elements.len() as i32, elements.as_ptr()))?;
        Ok(n as usize)
    }

    pub fn close_can_queue(&self) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        rpc_status!(rpc, CloseCANQueue())?;
        Ok(())
    }

    //-------------------------------------------------------------------------
    // Bit errors and signal conversions

    /// Overwrite bits of a message for a number of cycles, byte_order is "msb_first" or "lsb_first"
    pub fn set_can_err(&self, channel: i32, id: u32, start_bit: i32, bit_size: i32, byte_order: &str, cycles: u32, bit_err_value: u64) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        let byte_order = to_cstring(byte_order)?;
        rpc_status!(rpc, SetCanErr(channel, id as i32, start_bit, bit_size, byte_order.as_ptr(), cycles, bit_err_value))?;
        Ok(())
    }

    /// Overwrite a signal of a message for a number of cycles
    pub fn set_can_err_signal_name(&self, channel: i32, id: u32, signal: &str, cycles: u32, bit_err_value: u64) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        let signal = to_cstring(signal)?;
        rpc_status!(rpc, SetCanErrSignalName(channel, id as i32, signal.as_ptr(), cycles, bit_err_value))?;
        Ok(())
    }

    pub fn clear_can_err(&self) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        rpc_status!(rpc, ClearCanErr())?;
        Ok(())
    }

    /// Replace the conversion of a CAN signal with an equation
    pub fn set_can_signal_conversion(&self, channel: i32, id: u32, signal: &str, conversion: &str) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        let signal = to_cstring(signal)?;
        let conversion = to_cstring(conversion)?;
        rpc_status!(rpc, SetCanSignalConversion(channel, id as i32, signal.as_ptr(), conversion.as_ptr()))?;
        Ok(())
    }

    pub fn reset_can_signal_conversion(&self, channel: i32, id: u32, signal: &str) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        let signal = to_cstring(signal)?;
        rpc_status!(rpc, ResetCanSignalConversion(channel, id as i32, signal.as_ptr()))?;
        Ok(())
    }

    pub fn reset_all_can_signal_conversion(&self, channel: i32, id: u32) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        rpc_status!(rpc, ResetAllCanSignalConversion(channel, id as i32))?;
        Ok(())
    }

    //-------------------------------------------------------------------------
    // CAN recorder

    pub fn start_can_recorder(&self, file: &str, options: &CanRecorderOptions, windows: &[CanAcceptMask]) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        let c_file = to_cstring(file)?;
        let trigger = to_cstring(&options.trigger)?;
        let status = rpc_call!(
            rpc,
            StartCANRecorder(
                c_file.as_ptr(),
                trigger.as_ptr(),
                options.column_counter as i32,
                options.column_time_absolute as i32,
                options.column_time_diff as i32,
                options.column_time_diff_min_max as i32,
                windows.len() as i32,
                windows.as_ptr(),
            )
        )?;
        if status != 0 {
            return Err(XilEnvError::native(rpc_name!(StartCANRecorder), status));
        }
        info!("Started CAN recorder {}", file);
        Ok(())
    }

    pub fn stop_can_recorder(&self) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        rpc_status!(rpc, StopCANRecorder())?;
        Ok(())
    }
}
