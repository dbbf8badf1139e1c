use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::{
    Arc,
    PoisonError,
    RwLock
};

use log::debug;

use crate::quadrature::legendre::legendre_rule;
use crate::quadrature::quadratureerror::QuadratureError;
use crate::quadrature::quadraturerule::QuadratureRule;

/// 依點數 n 快取 Gauss-Legendre 規則。
///
/// 規則只由 n 決定，快取永不需要失效；`clear()` 僅用於釋放記憶體。
pub trait RuleCache {
    fn rule(&self, n: usize) -> Result<Arc<QuadratureRule>, QuadratureError>;

    fn len(&self) -> usize;

    fn clear(&self);

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ── 單執行緒版：RefCell ──────────────────────────────────────────────────────

pub struct RefCellRuleCache {
    rules: RefCell<HashMap<usize, Arc<QuadratureRule>>>
}

impl RefCellRuleCache {
    pub fn new() -> Self {
        Self { rules: RefCell::new(HashMap::new()) }
    }
}

impl Default for RefCellRuleCache {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleCache for RefCellRuleCache {
    fn rule(&self, n: usize) -> Result<Arc<QuadratureRule>, QuadratureError> {
        if let Some(rule) = self.rules.borrow().get(&n) {
            debug!("rule cache hit for n = {}", n);
            return Ok(Arc::clone(rule));
        }
        debug!("rule cache miss for n = {}", n);
        let rule = Arc::new(legendre_rule(n)?);
        self.rules.borrow_mut().insert(n, Arc::clone(&rule));
        Ok(rule)
    }

    fn len(&self) -> usize {
        self.rules.borrow().len()
    }

    fn clear(&self) {
        self.rules.borrow_mut().clear();
    }
}

// ── 多執行緒版：RwLock ───────────────────────────────────────────────────────
//
// 讀鎖查詢與寫鎖寫入之間，兩條執行緒可能同時發現 n 不存在而各自計算。
// 同一 n 的結果完全相同，後寫入者只會覆蓋相同的規則。

pub struct RwLockRuleCache {
    rules: RwLock<HashMap<usize, Arc<QuadratureRule>>>
}

impl RwLockRuleCache {
    pub fn new() -> Self {
        Self { rules: RwLock::new(HashMap::new()) }
    }
}

impl Default for RwLockRuleCache {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleCache for RwLockRuleCache {
    fn rule(&self, n: usize) -> Result<Arc<QuadratureRule>, QuadratureError> {
        if let Some(rule) = self.rules
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&n) {
            debug!("rule cache hit for n = {}", n);
            return Ok(Arc::clone(rule));
        }

        // 持鎖外計算
        debug!("rule cache miss for n = {}", n);
        let rule = Arc::new(legendre_rule(n)?);
        let mut rules = self.rules.write().unwrap_or_else(PoisonError::into_inner);
        Ok(Arc::clone(rules.entry(n).or_insert(rule)))
    }

    fn len(&self) -> usize {
        self.rules.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    fn clear(&self) {
        self.rules.write().unwrap_or_else(PoisonError::into_inner).clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refcell_cache_returns_shared_rule() {
        let cache = RefCellRuleCache::new();
        assert!(cache.is_empty());
        let first = cache.rule(7).unwrap();
        let second = cache.rule(7).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(*first, legendre_rule(7).unwrap());
        assert_eq!(cache.len(), 1);
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_cache_does_not_store_errors() {
        let cache = RefCellRuleCache::new();
        assert!(cache.rule(0).is_err());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_rwlock_cache_across_threads() {
        let cache = Arc::new(RwLockRuleCache::new());
        let handles: Vec<_> = (1..=8)
            .map(|n| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || cache.rule(n).map(|rule| rule.len()))
            })
            .collect();
        for (n, handle) in (1..=8).zip(handles) {
            assert_eq!(handle.join().unwrap(), Ok(n));
        }
        assert_eq!(cache.len(), 8);
        let first = cache.rule(4).unwrap();
        assert!(Arc::ptr_eq(&first, &cache.rule(4).unwrap()));
    }
}
