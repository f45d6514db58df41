//! 向导状态模块
//!
//! 把 `Wizard<File>` 放进本地信号，并负责参考文件预览地址的创建与释放。
//! 使用 `Copy` 的结构体，方便作为 Props 在各步骤组件间传递。

use crate::web::file::{object_url, revoke_object_url};
use leptos::prelude::*;
use modelgen::{MediaKind, ReferenceFile, Wizard, WizardForm, WizardStep};
use modelgen_shared::GenerationRecord;
use uuid::Uuid;
use web_sys::File;

#[derive(Clone, Copy)]
pub struct WizardState {
    // web_sys::File 不是 Send，只能放在本地存储中
    pub wizard: RwSignal<Wizard<File>, LocalStorage>,
    pub generating: RwSignal<bool>,
    /// 最近一次保存的记录，用于生成结果的下载文件名
    pub record: RwSignal<Option<GenerationRecord>>,
}

impl WizardState {
    pub fn new() -> Self {
        Self {
            wizard: RwSignal::new_local(Wizard::new()),
            generating: RwSignal::new(false),
            record: RwSignal::new(None),
        }
    }

    pub fn step(&self) -> WizardStep {
        self.wizard.with(|w| w.step())
    }

    /// 添加用户选择的文件，返回被拒绝（非图片 / 视频）的文件名
    pub fn add_files(&self, files: Vec<File>) -> Vec<String> {
        let mut rejected = Vec::new();
        let mut accepted = Vec::new();

        for file in files {
            let name = file.name();
            match ReferenceFile::new(name.clone(), &file.type_(), file) {
                Some(reference) => {
                    let reference = match reference.kind {
                        MediaKind::Image => match object_url(&reference.handle) {
                            Some(url) => reference.with_preview(url),
                            None => reference,
                        },
                        MediaKind::Video => reference,
                    };
                    accepted.push(reference);
                }
                None => rejected.push(name),
            }
        }

        if !accepted.is_empty() {
            log::info!("[Generator] added {} reference file(s)", accepted.len());
            self.wizard.update(|w| {
                for reference in accepted {
                    w.push_reference(reference);
                }
            });
        }
        rejected
    }

    pub fn remove_file(&self, id: Uuid) {
        let mut removed = None;
        self.wizard.update(|w| removed = w.remove_reference(id));
        if let Some(file) = removed {
            release_preview(&file);
        }
    }

    /// 回到第一步并清空表单与结果
    pub fn restart(&self) {
        let mut removed = Vec::new();
        self.wizard.update(|w| removed = w.restart());
        removed.iter().for_each(release_preview);
        self.record.set(None);
    }

    /// 组件卸载时释放所有预览地址
    pub fn release_previews(&self) {
        self.wizard.try_with_untracked(|w| {
            w.form().reference_files.iter().for_each(release_preview);
        });
    }

    pub fn form_snapshot(&self) -> WizardForm<File> {
        self.wizard.with_untracked(|w| w.form().clone())
    }
}

fn release_preview(file: &ReferenceFile<File>) {
    if let Some(url) = &file.preview {
        revoke_object_url(url);
    }
}
