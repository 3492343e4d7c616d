use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Advisory lock held across a load-modify-save cycle on a guest list.
///
/// Uses flock (Unix) on a sibling `.<file>.lock` so two `wp` processes
/// never interleave their read and write of the same list. The lock file
/// is left in place on release: every acquirer must lock the same inode.
pub struct FileLock {
    _file: File,
}

/// Error type for lock operations
#[derive(Debug, thiserror::Error)]
pub enum LockError {
    #[error("could not create lock file at {path}: {source}")]
    CreateError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not acquire lock on {path}: another wp process may be writing")]
    Timeout { path: PathBuf },
}

/// The lock file guarding `data_file`.
pub fn lock_path(data_file: &Path) -> PathBuf {
    let name = data_file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let dir = data_file.parent().unwrap_or(Path::new("."));
    dir.join(format!(".{}.lock", name))
}

impl FileLock {
    /// Acquire the lock for `data_file`, waiting up to `timeout`.
    pub fn acquire(data_file: &Path, timeout: Duration) -> Result<Self, LockError> {
        let lock_path = lock_path(data_file);
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(|e| LockError::CreateError {
                path: lock_path.clone(),
                source: e,
            })?;

        let start = Instant::now();
        loop {
            match try_lock(&file) {
                Ok(()) => return Ok(FileLock { _file: file }),
                Err(_) if start.elapsed() < timeout => {
                    std::thread::sleep(Duration::from_millis(10));
                }
                Err(_) => {
                    return Err(LockError::Timeout { path: lock_path });
                }
            }
        }
    }

    /// Acquire with default timeout (5 seconds)
    pub fn acquire_default(data_file: &Path) -> Result<Self, LockError> {
        Self::acquire(data_file, Duration::from_secs(5))
    }
}

#[cfg(unix)]
fn try_lock(file: &File) -> Result<(), std::io::Error> {
    use std::os::unix::io::AsRawFd;
    let fd = file.as_raw_fd();
    let result = unsafe { libc::flock(fd, libc::LOCK_EX | libc::LOCK_NB) };
    if result == 0 {
        Ok(())
    } else {
        Err(std::io::Error::last_os_error())
    }
}

#[cfg(not(unix))]
fn try_lock(_file: &File) -> Result<(), std::io::Error> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn lock_sits_next_to_data_file() {
        assert_eq!(
            lock_path(Path::new("/tmp/plan/guest_list.csv")),
            PathBuf::from("/tmp/plan/.guest_list.csv.lock")
        );
    }

    #[test]
    fn acquire_and_release() {
        let tmp = TempDir::new().unwrap();
        let data = tmp.path().join("guest_list.csv");

        let lock = FileLock::acquire_default(&data);
        assert!(lock.is_ok());
        drop(lock);
        assert!(lock_path(&data).exists());

        let again = FileLock::acquire_default(&data);
        assert!(again.is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn second_writer_times_out() {
        let tmp = TempDir::new().unwrap();
        let data = tmp.path().join("guest_list.csv");

        let _held = FileLock::acquire_default(&data).unwrap();
        let second = FileLock::acquire(&data, Duration::from_millis(50));
        assert!(matches!(second, Err(LockError::Timeout { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn handed_over_lock_still_excludes_others() {
        use std::sync::mpsc;
        use std::thread;

        let tmp = TempDir::new().unwrap();
        let data = tmp.path().join("guest_list.csv");

        let first = FileLock::acquire_default(&data).unwrap();

        // Second writer opens the lock file and waits while the first holds it
        let (acquired_tx, acquired_rx) = mpsc::channel();
        let (release_tx, release_rx) = mpsc::channel::<()>();
        let waiter_data = data.clone();
        let waiter = thread::spawn(move || {
            let lock = FileLock::acquire(&waiter_data, Duration::from_secs(5)).unwrap();
            acquired_tx.send(()).unwrap();
            release_rx.recv().unwrap();
            drop(lock);
        });

        thread::sleep(Duration::from_millis(50));
        drop(first);
        acquired_rx.recv().unwrap();

        // A third writer arriving now must wait for the second
        let third = FileLock::acquire(&data, Duration::from_millis(200));
        assert!(matches!(third, Err(LockError::Timeout { .. })));

        release_tx.send(()).unwrap();
        waiter.join().unwrap();
        assert!(FileLock::acquire(&data, Duration::from_millis(200)).is_ok());
    }
}
