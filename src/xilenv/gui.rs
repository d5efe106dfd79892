//-----------------------------------------------------------------------------
// Module gui
// Desktop, dialog, sheet and window control of the XilEnv GUI

use super::XilEnv;
use crate::error::XilEnvResult;
use crate::rpc::{rpc_status, to_cstring};

impl XilEnv {
    //-------------------------------------------------------------------------
    // Desktop

    pub fn load_desktop(&self, file: &str) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        let file = to_cstring(file)?;
        rpc_status!(rpc, LoadDesktop(file.as_ptr()))?;
        Ok(())
    }

    pub fn save_desktop(&self, file: &str) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        let file = to_cstring(file)?;
        rpc_status!(rpc, SaveDesktop(file.as_ptr()))?;
        Ok(())
    }

    pub fn clear_desktop(&self) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        rpc_status!(rpc, ClearDesktop())?;
        Ok(())
    }

    //-------------------------------------------------------------------------
    // User dialog

    /// Create a user dialog, items are added with add_dialog_item
    pub fn create_dialog(&self, name: &str) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        let name = to_cstring(name)?;
        rpc_status!(rpc, CreateDialog(name.as_ptr()))?;
        Ok(())
    }

    pub fn add_dialog_item(&self, description: &str, variable: &str) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        let description = to_cstring(description)?;
        let variable = to_cstring(variable)?;
        rpc_status!(rpc, AddDialogItem(description.as_ptr(), variable.as_ptr()))?;
        Ok(())
    }

    pub fn show_dialog(&self) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        rpc_status!(rpc, ShowDialog())?;
        Ok(())
    }

    pub fn is_dialog_closed(&self) -> XilEnvResult<bool> {
        let rpc = self.rpc()?;
        Ok(rpc_status!(rpc, IsDialogClosed())? != 0)
    }

    //-------------------------------------------------------------------------
    // Sheets

    pub fn select_sheet(&self, sheet: &str) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        let sheet = to_cstring(sheet)?;
        rpc_status!(rpc, SelectSheet(sheet.as_ptr()))?;
        Ok(())
    }

    pub fn add_sheet(&self, sheet: &str) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        let sheet = to_cstring(sheet)?;
        rpc_status!(rpc, AddSheet(sheet.as_ptr()))?;
        Ok(())
    }

    pub fn delete_sheet(&self, sheet: &str) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        let sheet = to_cstring(sheet)?;
        rpc_status!(rpc, DeleteSheet(sheet.as_ptr()))?;
        Ok(())
    }

    pub fn rename_sheet(&self, old_name: &str, new_name: &str) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        let old_name = to_cstring(old_name)?;
        let new_name = to_cstring(new_name)?;
        rpc_status!(rpc, RenameSheet(old_name.as_ptr(), new_name.as_ptr()))?;
        Ok(())
    }

    //-------------------------------------------------------------------------
    // Windows

    pub fn open_window(&self, window: &str) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        let window = to_cstring(window)?;
        rpc_status!(rpc, OpenWindow(window.as_ptr()))?;
        Ok(())
    }

    pub fn close_window(&self, window: &str) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        let window = to_cstring(window)?;
        rpc_status!(rpc, CloseWindow(window.as_ptr()))?;
        Ok(())
    }

    pub fn delete_window(&self, window: &str) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        let window = to_cstring(window)?;
        rpc_status!(rpc, DeleteWindow(window.as_ptr()))?;
        Ok(())
    }

    pub fn import_window(&self, window: &str, file: &str) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        let window = to_cstring(window)?;
        let file = to_cstring(file)?;
        rpc_status!(rpc, ImportWindow(window.as_ptr(), file.as_ptr()))?;
        Ok(())
    }

    /// Export a window of a sheet to a file
    pub fn export_window(&self, sheet: &str, window: &str, file: &str) -> XilEnvResult<()> {
        let rpc = self.rpc()?;
        let sheet = to_cstring(sheet)?;
        let window = to_cstring(window)?;
        let file = to_cstring(file)?;
        rpc_status!(rpc, ExportWindow(sheet.as_ptr(), window.as_ptr(), file.as_ptr()))?;
        Ok(())
    }
}
