use api::{HttpBackend, UploadFile, UploadReceipt};
use dioxus::prelude::*;
use tracing::warn;

use crate::core::config::DashboardConfig;
use crate::upload::{receipt_message, submit, DatasetKind, UploadError, UploadForm};

/// Two file pickers and a submit button. `on_uploaded` fires once the backend has accepted
/// both files; the platform crate uses it to move on to the stats page.
#[component]
pub fn Upload(on_uploaded: EventHandler<UploadReceipt>) -> Element {
    let config = try_use_context::<DashboardConfig>().unwrap_or_else(DashboardConfig::load);
    let form = use_signal(UploadForm::default);
    let mut message = use_signal(|| Option::<String>::None);
    let mut uploading = use_signal(|| false);

    let on_submit = move |_: MouseEvent| {
        let base_url = config.api_base_url.clone();
        async move {
            let backend = match HttpBackend::new(base_url) {
                Ok(backend) => backend,
                Err(err) => {
                    message.set(Some(UploadError::from(err).to_string()));
                    return;
                }
            };

            uploading.set(true);
            let snapshot = form();
            let result = submit(&backend, &snapshot).await;
            uploading.set(false);

            match result {
                Ok(receipt) => {
                    message.set(Some(receipt_message(&receipt)));
                    on_uploaded.call(receipt);
                }
                Err(err) => message.set(Some(err.to_string())),
            }
        }
    };

    rsx! {
        section { class: "page page-upload",
            h1 { {crate::t!("upload-title")} }
            p { {crate::t!("upload-intro")} }

            {file_slot(DatasetKind::Posts, form)}
            {file_slot(DatasetKind::Comments, form)}

            button {
                r#type: "button",
                class: "button button--primary page-upload__submit",
                disabled: uploading(),
                onclick: on_submit,
                {crate::t!("upload-submit")}
            }

            if let Some(text) = message() {
                p { class: "page-upload__message", "{text}" }
            }
        }
    }
}

fn file_slot(kind: DatasetKind, mut form: Signal<UploadForm>) -> Element {
    let chosen = form.read().slot(kind).file_name().map(str::to_string);

    rsx! {
        div { class: "page-upload__slot page-upload__slot--{kind}",
            h2 { "{kind.label()}" }
            input {
                r#type: "file",
                onchange: move |evt: FormEvent| async move {
                    let Some(engine) = evt.files() else {
                        return;
                    };
                    let Some(name) = engine.files().into_iter().next() else {
                        form.write().clear(kind);
                        return;
                    };
                    match engine.read_file(&name).await {
                        Some(bytes) => form.write().select(kind, UploadFile { name, bytes }),
                        None => {
                            warn!(file = %name, %kind, "couldn't read selected file");
                            form.write().clear(kind);
                        }
                    }
                },
            }
            if let Some(name) = chosen {
                span { class: "page-upload__file", "{name}" }
            }
        }
    }
}
