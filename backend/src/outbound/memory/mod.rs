//! In-process adapters used when no database URL is configured.
//!
//! State lives behind a `std::sync::Mutex` and is lost on restart. Locks are
//! never held across an `.await`.

mod forms;
mod reservations;
mod sessions;
mod users;

use std::sync::{Mutex, MutexGuard, PoisonError};

pub use forms::{MemoryContactRepository, MemoryFeedbackRepository};
pub use reservations::MemoryReservationRepository;
pub use sessions::MemorySessionStore;
pub use users::MemoryUserRepository;

/// Lock `mutex`, recovering the data if a previous holder panicked.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
