//! Win32 backend
//!
//! Thin wrappers over user32/comctl32 calls plus the window subclass that
//! feeds `WM_SIZING` and `WM_WINDOWPOSCHANGING` into an
//! [`AspectRatioGuard`]. The subclass is installed with
//! `SetWindowSubclass` and removed when the returned [`SubclassHook`] is
//! dropped or the window receives `WM_NCDESTROY`, whichever comes first.

use crate::platform::{MenuHandle, MonitorBounds, NativeHandle, Platform, WindowStyle};
use crate::utils::error::{ChromeError, IntoChromeError, Result};
use crate::window::resize::{AspectRatioGuard, FrameSize, ProposedFrame, ResizeEdge};
use raw_window_handle::{HasWindowHandle, RawWindowHandle};
use windows::Win32::Foundation::{HWND, LPARAM, LRESULT, RECT, WPARAM};
use windows::Win32::Graphics::Gdi::{
    GetMonitorInfoW, MonitorFromWindow, MONITORINFO, MONITOR_DEFAULTTONEAREST,
};
use windows::Win32::UI::Shell::{DefSubclassProc, RemoveWindowSubclass, SetWindowSubclass};
use windows::Win32::UI::WindowsAndMessaging::{
    DrawMenuBar, GetSystemMenu, GetWindowLongW, GetWindowRect, IsWindow, RemoveMenu,
    SetWindowLongW, GWL_STYLE, HMENU, MF_BYCOMMAND, SWP_NOSIZE, WINDOWPOS, WM_EXITSIZEMOVE,
    WM_NCDESTROY, WM_SIZING, WM_WINDOWPOSCHANGING,
};

/// Subclass id used for the resize hook
const RESIZE_SUBCLASS_ID: usize = 0x666C_6578;

/// A realized Win32 top-level window
#[derive(Debug, Clone, Copy)]
pub struct Win32Platform {
    hwnd: HWND,
}

impl Win32Platform {
    /// Take the HWND of a window created by any raw-window-handle provider
    pub fn from_window<W: HasWindowHandle + ?Sized>(window: &W) -> Result<Self> {
        let handle = window.window_handle().platform_err("Failed to get window handle")?;

        match handle.as_raw() {
            RawWindowHandle::Win32(handle) => Ok(Self {
                hwnd: HWND(handle.hwnd.get() as *mut _),
            }),
            other => Err(ChromeError::Platform(format!(
                "Expected a Win32 window handle, got {:?}",
                other
            ))),
        }
    }

    /// Wrap a raw HWND value
    ///
    /// # Safety
    ///
    /// `hwnd` must identify a window owned by the calling thread for as long
    /// as the returned value is used.
    pub unsafe fn from_raw(hwnd: isize) -> Result<Self> {
        if hwnd == 0 {
            return Err(ChromeError::Platform("Window handle is null".to_string()));
        }
        Ok(Self {
            hwnd: HWND(hwnd as *mut _),
        })
    }
}

impl Platform for Win32Platform {
    type Hook = SubclassHook;

    fn handle(&self) -> NativeHandle {
        NativeHandle(self.hwnd.0 as isize)
    }

    fn is_alive(&self) -> bool {
        unsafe { IsWindow(Some(self.hwnd)).as_bool() }
    }

    fn nearest_monitor(&self) -> Option<MonitorBounds> {
        unsafe {
            let monitor = MonitorFromWindow(self.hwnd, MONITOR_DEFAULTTONEAREST);
            if monitor.is_invalid() {
                return None;
            }

            let mut info = MONITORINFO {
                cbSize: std::mem::size_of::<MONITORINFO>() as u32,
                ..Default::default()
            };
            if !GetMonitorInfoW(monitor, &mut info).as_bool() {
                return None;
            }

            let rect = info.rcMonitor;
            Some(MonitorBounds::new(rect.left, rect.top, rect.right, rect.bottom))
        }
    }

    fn frame_size(&self) -> Option<FrameSize> {
        window_frame_size(self.hwnd)
    }

    fn style(&self) -> WindowStyle {
        WindowStyle(unsafe { GetWindowLongW(self.hwnd, GWL_STYLE) } as u32)
    }

    fn set_style(&self, style: WindowStyle) {
        unsafe {
            SetWindowLongW(self.hwnd, GWL_STYLE, style.0 as i32);
        }
    }

    fn system_menu(&self, reset: bool) -> Option<MenuHandle> {
        let menu = unsafe { GetSystemMenu(self.hwnd, reset) };
        if menu.is_invalid() {
            None
        } else {
            Some(MenuHandle(menu.0 as isize))
        }
    }

    fn remove_menu_entry(&self, menu: MenuHandle, command: u32) {
        // Fails when the entry is already gone, which is the state we want.
        let _ = unsafe { RemoveMenu(HMENU(menu.0 as *mut _), command, MF_BYCOMMAND) };
    }

    fn redraw_frame(&self) {
        let _ = unsafe { DrawMenuBar(self.hwnd) };
    }

    fn install_resize_hook(&self, guard: AspectRatioGuard) -> Result<SubclassHook> {
        let state = Box::into_raw(Box::new(HookState { guard }));

        let installed = unsafe {
            SetWindowSubclass(self.hwnd, Some(resize_subclass_proc), RESIZE_SUBCLASS_ID, state as usize)
        };
        if !installed.as_bool() {
            drop(unsafe { Box::from_raw(state) });
            return Err(ChromeError::Platform(format!(
                "SetWindowSubclass failed for {:?}",
                self.handle()
            )));
        }

        log::debug!("Installed resize subclass on {:?}", self.handle());
        Ok(SubclassHook {
            hwnd: self.hwnd,
            state,
        })
    }
}

/// State reached from the subclass procedure through `dwRefData`
struct HookState {
    guard: AspectRatioGuard,
}

/// Installed resize subclass. Dropping it removes the subclass.
pub struct SubclassHook {
    hwnd: HWND,

    /// Owned allocation handed to the subclass as `dwRefData`. Only the
    /// subclass procedure dereferences it until `Drop` reclaims it.
    state: *mut HookState,
}

impl Drop for SubclassHook {
    fn drop(&mut self) {
        // Already gone if the window was destroyed first.
        let _ = unsafe {
            RemoveWindowSubclass(self.hwnd, Some(resize_subclass_proc), RESIZE_SUBCLASS_ID)
        };
        drop(unsafe { Box::from_raw(self.state) });
        log::debug!("Removed resize subclass from {:?}", NativeHandle(self.hwnd.0 as isize));
    }
}

fn window_frame_size(hwnd: HWND) -> Option<FrameSize> {
    let mut rect = RECT::default();
    unsafe { GetWindowRect(hwnd, &mut rect) }.ok()?;
    Some(FrameSize::new(rect.right - rect.left, rect.bottom - rect.top))
}

unsafe extern "system" fn resize_subclass_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
    _id: usize,
    ref_data: usize,
) -> LRESULT {
    let state = unsafe { &mut *(ref_data as *mut HookState) };

    match msg {
        WM_SIZING => state.guard.track_edge(ResizeEdge::from_native(wparam.0 as u32)),
        WM_EXITSIZEMOVE => state.guard.end_gesture(),
        WM_WINDOWPOSCHANGING => {
            let pos = unsafe { &mut *(lparam.0 as *mut WINDOWPOS) };
            if !pos.flags.contains(SWP_NOSIZE) {
                if let Some(committed) = window_frame_size(hwnd) {
                    let mut frame = ProposedFrame::new(pos.x, pos.y, pos.cx, pos.cy);
                    if state.guard.correct(&mut frame, committed) {
                        pos.x = frame.x;
                        pos.y = frame.y;
                        pos.cx = frame.width;
                        pos.cy = frame.height;
                    }
                }
            }
        }
        WM_NCDESTROY => {
            let _ = unsafe {
                RemoveWindowSubclass(hwnd, Some(resize_subclass_proc), RESIZE_SUBCLASS_ID)
            };
        }
        _ => {}
    }

    unsafe { DefSubclassProc(hwnd, msg, wparam, lparam) }
}
