use dashboard::{ListView, MyRequests, RequestRow, RowAction};
use payloads::DonationRequest;
use yew::prelude::*;

use super::{DonorDetailsPopup, RequestActionsMenu, Spinner};

#[derive(Properties, PartialEq)]
pub struct Props {
    pub page: MyRequests,
    /// Bumped by the owner on every controller change, forcing a re-render.
    pub version: u64,
}

#[function_component]
pub fn MyRequestsTable(props: &Props) -> Html {
    match props.page.list() {
        ListView::Loading => html! {
            <div class="flex justify-center py-12"><Spinner size="h-8 w-8" /></div>
        },
        // The failure toast has already been shown
        ListView::Failed => html! {},
        ListView::Empty => html! {
            <p class="text-center py-12 text-neutral-600 dark:text-neutral-400">
                {"No requests are made yet."}
            </p>
        },
        ListView::Rows(rows) => html! {
            <div class="overflow-x-auto">
                <table class="min-w-full divide-y divide-neutral-200 dark:divide-neutral-700 text-sm">
                    <thead class="bg-neutral-50 dark:bg-neutral-800">
                        <tr>
                            {for ["Date", "Blood Group", "Gender", "District", "Donor Details", "Actions", "More"]
                                .into_iter()
                                .map(|title| html! {
                                    <th class="px-4 py-3 text-left font-medium text-neutral-600 dark:text-neutral-300">
                                        {title}
                                    </th>
                                })}
                        </tr>
                    </thead>
                    <tbody class="divide-y divide-neutral-200 dark:divide-neutral-700">
                        {for rows.into_iter().map(|row| {
                            let key = row.request.id.to_string();
                            html! { <RequestRowView key={key} {row} page={props.page.clone()} /> }
                        })}
                    </tbody>
                </table>
            </div>
        },
    }
}

/// Run `action` on `request` in the background. Failures have already been
/// logged by the dashboard layer.
fn dispatch(
    page: &MyRequests,
    request: &DonationRequest,
    action: RowAction,
) -> Callback<()> {
    let page = page.clone();
    let request = request.clone();
    Callback::from(move |_| {
        let page = page.clone();
        let request = request.clone();
        yew::platform::spawn_local(async move {
            let result = match action {
                RowAction::Approve => page.approve(&request).await,
                RowAction::Cancel => page.cancel(&request).await,
                RowAction::Delete => page.delete(&request).await,
            };
            if let Err(e) = result {
                tracing::debug!(request_id = %request.id, ?action, "{e}");
            }
        });
    })
}

#[derive(Properties, PartialEq)]
struct RowProps {
    row: RequestRow,
    page: MyRequests,
}

#[function_component]
fn RequestRowView(props: &RowProps) -> Html {
    let row = &props.row;
    let request = &row.request;
    let approve = row.approve;

    let on_approve = {
        let approve_action = dispatch(&props.page, request, RowAction::Approve);
        Callback::from(move |_: MouseEvent| approve_action.emit(()))
    };

    let approve_class = if approve.label.shows_success_glyph() {
        "bg-green-100 text-green-800 dark:bg-green-900 dark:text-green-200"
    } else if approve.enabled {
        "bg-red-600 text-white hover:bg-red-700"
    } else {
        "bg-neutral-100 text-neutral-500 dark:bg-neutral-800"
    };

    html! {
        <tr>
            <td class="px-4 py-3">{request.date_of_donation.strftime("%d %b %Y").to_string()}</td>
            <td class="px-4 py-3 font-semibold">{request.blood_group.to_string()}</td>
            <td class="px-4 py-3">{request.gender.to_string()}</td>
            <td class="px-4 py-3">{&request.district}</td>
            <td class="px-4 py-3">
                <DonorDetailsPopup donor={row.donor.clone()} status={request.blood_request_type} />
            </td>
            <td class="px-4 py-3">
                <button
                    onclick={on_approve}
                    disabled={!approve.is_clickable()}
                    class={format!(
                        "inline-flex items-center gap-2 px-3 py-1 rounded-md font-medium \
                         disabled:cursor-not-allowed {approve_class}"
                    )}
                >
                    if approve.label.shows_spinner() {
                        <Spinner />
                    }
                    if approve.label.shows_success_glyph() {
                        <span aria-hidden="true">{"✓"}</span>
                    }
                    {approve.label.text()}
                </button>
            </td>
            <td class="px-4 py-3">
                <RequestActionsMenu
                    cancel={row.cancel}
                    delete={row.delete}
                    on_cancel={dispatch(&props.page, request, RowAction::Cancel)}
                    on_delete={dispatch(&props.page, request, RowAction::Delete)}
                />
            </td>
        </tr>
    }
}
