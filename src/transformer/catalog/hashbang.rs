//! Code-level transformers bracketing parse/generate: a leading `#!...` line isn't valid
//! JavaScript to most parsers, so it's stripped before parsing and restored verbatim after
//! generation. The two halves share a slot so the exact original line (including its line
//! terminator) survives the round trip untouched.

use std::cell::RefCell;
use std::rc::Rc;

use crate::transformer::{CodeTransformationStage, CodeTransformer, TransformerName};

type Slot = Rc<RefCell<Option<String>>>;

pub struct HashbangStrip {
    slot: Slot,
}

impl HashbangStrip {
    pub fn new(slot: Slot) -> Self {
        Self { slot }
    }
}

impl CodeTransformer for HashbangStrip {
    fn name(&self) -> TransformerName {
        TransformerName::HashbangStrip
    }

    fn is_active(&self, stage: CodeTransformationStage) -> bool {
        stage == CodeTransformationStage::PreparingTransformers
    }

    fn apply(&mut self, stage: CodeTransformationStage, source: String) -> Option<String> {
        if stage != CodeTransformationStage::PreparingTransformers {
            return None;
        }
        if !source.starts_with("#!") {
            return Some(source);
        }
        let end = source.find('\n').map(|i| i + 1).unwrap_or(source.len());
        let (hashbang, rest) = source.split_at(end);
        *self.slot.borrow_mut() = Some(hashbang.to_string());
        Some(rest.to_string())
    }
}

pub struct HashbangRestore {
    slot: Slot,
}

impl HashbangRestore {
    pub fn new(slot: Slot) -> Self {
        Self { slot }
    }
}

impl CodeTransformer for HashbangRestore {
    fn name(&self) -> TransformerName {
        TransformerName::HashbangRestore
    }

    fn dependencies(&self) -> std::collections::HashSet<TransformerName> {
        std::collections::HashSet::new()
    }

    fn is_active(&self, stage: CodeTransformationStage) -> bool {
        stage == CodeTransformationStage::FinalizingTransformers
    }

    fn apply(&mut self, stage: CodeTransformationStage, source: String) -> Option<String> {
        if stage != CodeTransformationStage::FinalizingTransformers {
            return None;
        }
        match self.slot.borrow_mut().take() {
            Some(hashbang) => Some(format!("{hashbang}{source}")),
            None => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot() -> Slot {
        Rc::new(RefCell::new(None))
    }

    #[test]
    fn strips_and_restores_hashbang() {
        let slot = slot();
        let mut strip = HashbangStrip::new(slot.clone());
        let mut restore = HashbangRestore::new(slot);

        let source = "#!/usr/bin/env node\nconsole.log(1);".to_string();
        let stripped = strip.apply(CodeTransformationStage::PreparingTransformers, source).unwrap();
        assert_eq!(stripped, "console.log(1);");

        let restored = restore.apply(CodeTransformationStage::FinalizingTransformers, stripped).unwrap();
        assert_eq!(restored, "#!/usr/bin/env node\nconsole.log(1);");
    }

    #[test]
    fn source_without_hashbang_is_untouched() {
        let slot = slot();
        let mut strip = HashbangStrip::new(slot.clone());
        let mut restore = HashbangRestore::new(slot);

        let source = "console.log(1);".to_string();
        let stripped = strip.apply(CodeTransformationStage::PreparingTransformers, source).unwrap();
        let restored = restore.apply(CodeTransformationStage::FinalizingTransformers, stripped).unwrap();
        assert_eq!(restored, "console.log(1);");
    }

    #[test]
    fn wrong_stage_is_inactive() {
        let slot = slot();
        let strip = HashbangStrip::new(slot);
        assert!(!strip.is_active(CodeTransformationStage::FinalizingTransformers));
        assert!(strip.is_active(CodeTransformationStage::PreparingTransformers));
    }

    #[test]
    fn is_active_does_not_consume_the_stored_hashbang() {
        let slot = slot();
        *slot.borrow_mut() = Some("#!/usr/bin/env node\n".to_string());
        let restore = HashbangRestore::new(slot.clone());

        assert!(restore.is_active(CodeTransformationStage::FinalizingTransformers));
        assert!(!restore.is_active(CodeTransformationStage::PreparingTransformers));
        assert!(slot.borrow().is_some(), "probing activity must not take the stored hashbang");
    }
}
