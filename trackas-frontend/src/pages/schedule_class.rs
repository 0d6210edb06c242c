use anyhow::anyhow;
use leptos::*;
use time::{format_description::BorrowedFormatItem, macros::format_description, Date, Time};

use trackas_boundary::NewClass;
use trackas_core::{
    entities::Coordinate,
    picker::LocationHost,
    usecases::{self, ClassScheduleForm},
};

use crate::components::MapModal;

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");
const TIME_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[hour]:[minute]");

const DEFAULT_MAP_CENTER: (f64, f64) = (7.3056, 5.1357);

struct Scheduled {
    row: String,
    attendance_link: Option<String>,
}

fn schedule(form: &ClassScheduleForm, course_id: &str) -> anyhow::Result<Scheduled> {
    let schedule = usecases::schedule_class(form)?;
    let attendance_link = if course_id.trim().is_empty() {
        None
    } else {
        let origin = window()
            .location()
            .origin()
            .map_err(|_| anyhow!("Unknown origin of this page"))?;
        Some(usecases::attendance_link(&origin, course_id, &schedule)?)
    };
    let row = NewClass::try_from(schedule)?;
    let row = serde_json::to_string_pretty(&row)?;
    Ok(Scheduled {
        row,
        attendance_link,
    })
}

#[component]
pub fn ScheduleClass() -> impl IntoView {
    let form = RwSignal::new(ClassScheduleForm::default());
    let course_id = RwSignal::new(String::new());
    let result = RwSignal::new(None::<Result<Scheduled, String>>);

    let (lat, lng) = DEFAULT_MAP_CENTER;
    let center = Coordinate::from_lat_lng_deg(lat, lng);

    let on_select_location = Callback::new(move |(name, pos): (String, Coordinate)| {
        log::debug!("Venue selected: {name}");
        form.update(|form| form.on_select_location(&name, pos));
    });
    let on_close = Callback::new(move |()| form.update(LocationHost::on_close));

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let outcome = form.with_untracked(|form| {
            course_id.with_untracked(|id| schedule(form, id).map_err(|err| err.to_string()))
        });
        if let Err(err) = &outcome {
            log::warn!("Unable to schedule class: {err}");
        }
        result.set(Some(outcome));
    };

    view! {
      <section class="container p-6 mx-auto max-w-xl">
        <h1 class="text-2xl font-bold mb-4">"Schedule a class"</h1>
        <form class="flex flex-col gap-3" on:submit=on_submit>
          <input
            type="text"
            placeholder="Course title"
            class="border border-gray-300 px-3 py-2 rounded"
            on:input = move |ev| form.update(|f| f.course_title = event_target_value(&ev))
          />
          <input
            type="text"
            placeholder="Course code"
            class="border border-gray-300 px-3 py-2 rounded"
            on:input = move |ev| form.update(|f| f.course_code = event_target_value(&ev))
          />
          <input
            type="text"
            placeholder="Course ID (for the attendance link)"
            class="border border-gray-300 px-3 py-2 rounded"
            on:input = move |ev| course_id.set(event_target_value(&ev))
          />
          <div class="flex gap-2">
            <input
              type="text"
              readonly
              placeholder="Lecture venue"
              class="border border-gray-300 px-3 py-2 rounded flex-1"
              prop:value = move || form.with(|f| f.lecture_venue.clone())
            />
            <button
              type="button"
              class="bg-blue-500 text-white px-3 py-2 rounded hover:bg-blue-600"
              on:click = move |_| form.update(ClassScheduleForm::open_venue_picker)
            >
              "Pick on map"
            </button>
          </div>
          <input
            type="date"
            class="border border-gray-300 px-3 py-2 rounded"
            on:input = move |ev| {
              let date = Date::parse(&event_target_value(&ev), DATE_FORMAT).ok();
              form.update(|f| f.date = date);
            }
          />
          <input
            type="time"
            class="border border-gray-300 px-3 py-2 rounded"
            on:input = move |ev| {
              let time = Time::parse(&event_target_value(&ev), TIME_FORMAT).ok();
              form.update(|f| f.time = time);
            }
          />
          <textarea
            placeholder="Note"
            class="border border-gray-300 px-3 py-2 rounded"
            on:input = move |ev| form.update(|f| f.note = event_target_value(&ev))
          />
          <button type="submit" class="bg-green-500 text-white px-4 py-2 rounded hover:bg-green-600">
            "Schedule"
          </button>
        </form>
        { move || result.with(|result| match result {
            Some(Ok(Scheduled { row, attendance_link })) => view! {
              <div class="mt-4">
                <pre class="bg-gray-100 p-2 rounded text-sm">{ row.clone() }</pre>
                { attendance_link.clone().map(|link| {
                    let href = link.clone();
                    view! { <p class="mt-2 break-all">"Attendance link: " <a href=href>{ link }</a></p> }
                }) }
              </div>
            }.into_view(),
            Some(Err(err)) => view! { <p class="mt-4 text-red-700">{ err.clone() }</p> }.into_view(),
            None => ().into_view(),
          })
        }
        { move || form.with(|f| f.picking_venue).then(|| view! {
            <MapModal center on_select_location on_close />
          })
        }
      </section>
    }
}
