use dashboard::ActionControl;
use yew::prelude::*;

use super::Spinner;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub cancel: ActionControl,
    pub delete: ActionControl,
    pub on_cancel: Callback<()>,
    pub on_delete: Callback<()>,
}

struct Item {
    label: &'static str,
    busy_label: &'static str,
    control: ActionControl,
    on_click: Callback<()>,
    danger: bool,
}

/// Row-local popover holding the Cancel and Delete actions.
#[function_component]
pub fn RequestActionsMenu(props: &Props) -> Html {
    let is_open = use_state(|| false);

    let on_toggle = {
        let is_open = is_open.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            is_open.set(!*is_open);
        })
    };

    let on_backdrop_click = {
        let is_open = is_open.clone();
        Callback::from(move |_: MouseEvent| is_open.set(false))
    };

    let items = [
        Item {
            label: "Cancel",
            busy_label: "Canceling",
            control: props.cancel,
            on_click: props.on_cancel.clone(),
            danger: false,
        },
        Item {
            label: "Delete",
            busy_label: "Deleting",
            control: props.delete,
            on_click: props.on_delete.clone(),
            danger: true,
        },
    ];

    html! {
        <div class="relative">
            <button
                onclick={on_toggle}
                class="p-2 rounded hover:bg-neutral-100 dark:hover:bg-neutral-700 \
                       text-neutral-600 dark:text-neutral-400"
                aria-label="More options"
            >
                // Vertical ellipsis (kebab menu)
                <svg
                    xmlns="http://www.w3.org/2000/svg"
                    class="h-5 w-5"
                    viewBox="0 0 20 20"
                    fill="currentColor"
                >
                    <path d="M10 6a2 2 0 110-4 2 2 0 010 4zM10 12a2 2 0 110-4 2 2 0 010 4zM10 18a2 2 0 110-4 2 2 0 010 4z" />
                </svg>
            </button>

            if *is_open {
                <>
                <div onclick={on_backdrop_click} class="fixed inset-0 z-40" />
                <div class="absolute right-0 mt-1 py-1 w-40 bg-white \
                            dark:bg-neutral-800 rounded-md shadow-lg \
                            border border-neutral-200 dark:border-neutral-700 \
                            z-50">
                    {for items.into_iter().map(|item| {
                        let on_click = item.on_click;
                        let onclick = Callback::from(move |e: MouseEvent| {
                            e.stop_propagation();
                            on_click.emit(());
                        });

                        let text_class = if item.danger {
                            "text-red-600 dark:text-red-400"
                        } else {
                            "text-neutral-700 dark:text-neutral-300"
                        };

                        html! {
                            <button
                                {onclick}
                                disabled={!item.control.is_clickable()}
                                class={format!(
                                    "w-full flex items-center gap-2 px-4 py-2 text-sm text-left \
                                     hover:bg-neutral-100 dark:hover:bg-neutral-700 \
                                     disabled:opacity-50 disabled:cursor-not-allowed {}",
                                    text_class
                                )}
                            >
                                if item.control.busy {
                                    <><Spinner />{item.busy_label}</>
                                } else {
                                    {item.label}
                                }
                            </button>
                        }
                    })}
                </div>
                </>
            }
        </div>
    }
}
