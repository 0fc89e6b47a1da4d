use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// 按 key 区分的异步互斥锁，同一个 key 同时只有一个持有者
#[derive(Clone, Default)]
pub struct KeyedLocks {
    inner: Arc<Mutex<HashMap<String, Arc<AsyncMutex<()>>>>>,
}

impl KeyedLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn lock(&self, key: &str) -> KeyGuard {
        let mutex = {
            let mut map = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
            map.entry(key.to_string()).or_default().clone()
        };

        let guard = mutex.lock_owned().await;
        KeyGuard {
            key: key.to_string(),
            locks: self.clone(),
            _guard: guard,
        }
    }

    /// 当前登记的 key 数量
    pub fn len(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub struct KeyGuard {
    key: String,
    locks: KeyedLocks,
    _guard: OwnedMutexGuard<()>,
}

impl Drop for KeyGuard {
    fn drop(&mut self) {
        let mut map = self
            .locks
            .inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        // 只剩表和本 guard 持有引用时，没有人在等待，可以移除
        let idle = map
            .get(&self.key)
            .is_some_and(|mutex| Arc::strong_count(mutex) <= 2);
        if idle {
            map.remove(&self.key);
        }
    }
}
