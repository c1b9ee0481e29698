use dashboard::{AvailableRequests, AvailableRow, DonorAction, ListView};
use payloads::DonationRequest;
use yew::prelude::*;

use super::Spinner;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub page: AvailableRequests,
    pub version: u64,
}

#[function_component]
pub fn AvailableRequestsTable(props: &Props) -> Html {
    match props.page.list() {
        ListView::Loading => html! {
            <div class="flex justify-center py-12"><Spinner size="h-8 w-8" /></div>
        },
        ListView::Failed => html! {},
        ListView::Empty => html! {
            <p class="text-center py-12 text-neutral-600 dark:text-neutral-400">
                {"No one needs blood right now."}
            </p>
        },
        ListView::Rows(rows) => html! {
            <div class="overflow-x-auto">
                <table class="min-w-full divide-y divide-neutral-200 dark:divide-neutral-700 text-sm">
                    <thead class="bg-neutral-50 dark:bg-neutral-800">
                        <tr>
                            {for ["Date", "Blood Group", "Gender", "District", "Status", "Actions"]
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
                            html! { <AvailableRowView key={key} {row} page={props.page.clone()} /> }
                        })}
                    </tbody>
                </table>
            </div>
        },
    }
}

fn dispatch(
    page: &AvailableRequests,
    request: &DonationRequest,
    action: DonorAction,
) -> Callback<MouseEvent> {
    let page = page.clone();
    let request = request.clone();
    Callback::from(move |_| {
        let page = page.clone();
        let request = request.clone();
        yew::platform::spawn_local(async move {
            let result = match action {
                DonorAction::Accept => page.accept(&request).await,
                DonorAction::CancelDonation => page.cancel_donation(&request).await,
            };
            if let Err(e) = result {
                tracing::debug!(request_id = %request.id, ?action, "{e}");
            }
        });
    })
}

#[derive(Properties, PartialEq)]
struct RowProps {
    row: AvailableRow,
    page: AvailableRequests,
}

#[function_component]
fn AvailableRowView(props: &RowProps) -> Html {
    let row = &props.row;
    let request = &row.request;

    let status = if row.accepted_by_me {
        "Accepted by you".to_string()
    } else {
        request.blood_request_type.to_string()
    };

    html! {
        <tr>
            <td class="px-4 py-3">{request.date_of_donation.strftime("%d %b %Y").to_string()}</td>
            <td class="px-4 py-3 font-semibold">{request.blood_group.to_string()}</td>
            <td class="px-4 py-3">{request.gender.to_string()}</td>
            <td class="px-4 py-3">{&request.district}</td>
            <td class="px-4 py-3">{status}</td>
            <td class="px-4 py-3 flex gap-2">
                if row.accept.enabled {
                    <button
                        onclick={dispatch(&props.page, request, DonorAction::Accept)}
                        disabled={!row.accept.is_clickable()}
                        class="inline-flex items-center gap-2 px-3 py-1 rounded-md font-medium \
                               bg-red-600 text-white hover:bg-red-700 disabled:opacity-50"
                    >
                        if row.accept.busy { <Spinner /> }
                        {"Accept"}
                    </button>
                }
                if row.cancel_donation.enabled {
                    <button
                        onclick={dispatch(&props.page, request, DonorAction::CancelDonation)}
                        disabled={!row.cancel_donation.is_clickable()}
                        class="inline-flex items-center gap-2 px-3 py-1 rounded-md font-medium \
                               border border-neutral-300 dark:border-neutral-600 disabled:opacity-50"
                    >
                        if row.cancel_donation.busy { <Spinner /> }
                        {"Cancel donation"}
                    </button>
                }
            </td>
        </tr>
    }
}
