use core::cell::RefCell;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

use crate::body::OrientationBody;

/// Last formatted orientation body.
///
/// Single writer (the sampling loop), any number of readers. Readers get a
/// copy taken inside a critical section, so a body is never observed half
/// written.
pub struct OrientationSnapshot {
    body: Mutex<CriticalSectionRawMutex, RefCell<OrientationBody>>,
}

impl Default for OrientationSnapshot {
    fn default() -> Self {
        Self::new()
    }
}

impl OrientationSnapshot {
    pub const fn new() -> Self {
        Self {
            body: Mutex::new(RefCell::new(OrientationBody::new())),
        }
    }

    /// Replace the stored body.
    pub fn publish(&self, body: &OrientationBody) {
        self.body.lock(|cell| {
            cell.borrow_mut().clone_from(body);
        });
    }

    /// Copy of the latest body. Empty until the first publish.
    pub fn read(&self) -> OrientationBody {
        self.body.lock(|cell| cell.borrow().clone())
    }
}
