//! `/dev/mem` register bus
//!
//! Maps the peripheral window once at startup and performs volatile 32-bit
//! accesses at register offsets. Requires access to the raw physical-memory
//! device, which usually means root; failure to map is unrecoverable.
//!
//! All unsafe code in the crate lives here.

use std::io;
use std::ptr;

use crate::config;
use crate::hal::{Register, RegisterBus};
use crate::types::Error;

/// Owned mapping of the peripheral window
///
/// The process holds the mapping exclusively for its lifetime; it is
/// unmapped on drop, after the clock has been disabled.
#[derive(Debug)]
pub struct DevMem {
    base: *mut u8,
    len: usize,
}

impl DevMem {
    /// Map the peripheral window through `/dev/mem`.
    ///
    /// The file descriptor is closed immediately after mapping; the mapping
    /// itself stays valid until drop.
    ///
    /// # Errors
    ///
    /// [`Error::RegisterMap`] when the device cannot be opened or the
    /// mapping fails (insufficient privilege, missing device, or an
    /// unsupported platform).
    pub fn map() -> Result<Self, Error> {
        let fd = unsafe {
            libc::open(
                c"/dev/mem".as_ptr().cast(),
                libc::O_RDWR | libc::O_SYNC,
            )
        };
        if fd < 0 {
            return Err(Error::RegisterMap(io::Error::last_os_error()));
        }

        let len = config::PERIPHERAL_WINDOW_LEN;
        let base = unsafe {
            libc::mmap(
                ptr::null_mut(),
                len,
                libc::PROT_READ | libc::PROT_WRITE,
                libc::MAP_SHARED,
                fd,
                config::PERIPHERAL_BASE as libc::off_t,
            )
        };
        let map_err = io::Error::last_os_error();
        unsafe {
            libc::close(fd);
        }
        if base == libc::MAP_FAILED {
            return Err(Error::RegisterMap(map_err));
        }

        Ok(Self {
            base: base.cast::<u8>(),
            len,
        })
    }

    fn register_ptr(&self, reg: Register) -> *mut u32 {
        // Offsets are compile-time constants well inside the mapped window
        // and 4-byte aligned.
        unsafe { self.base.add(reg.offset()).cast::<u32>() }
    }
}

impl RegisterBus for DevMem {
    fn read(&self, reg: Register) -> u32 {
        unsafe { ptr::read_volatile(self.register_ptr(reg)) }
    }

    fn write(&mut self, reg: Register, value: u32) {
        unsafe { ptr::write_volatile(self.register_ptr(reg), value) }
    }
}

impl Drop for DevMem {
    fn drop(&mut self) {
        unsafe {
            libc::munmap(self.base.cast(), self.len);
        }
    }
}
