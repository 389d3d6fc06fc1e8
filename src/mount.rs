use std::cell::RefCell;

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{Document, HtmlElement, Window};

use crate::flags::Flags;
use crate::host;
use crate::ports::{self, PortMessage};
use crate::prefs::LocalStorage;

/// Global the compiled game attaches itself to.
const APP_GLOBAL: &str = "Minesweeper";
const MOUNT_NODE_ID: &str = "app";

thread_local! {
    static SHELL: RefCell<Option<Shell>> = const { RefCell::new(None) };
}

pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    // Mounting waits on the host handshake, so boot runs as a task.
    wasm_bindgen_futures::spawn_local(async {
        if let Err(error) = boot().await {
            web_sys::console::error_2(&JsValue::from_str("failed to mount minesweeper"), &error);
        }
    });

    Ok(())
}

async fn boot() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("Window unavailable"))?;

    let username = host::resolve_username(&window).await;
    let flags = Flags::gather(&LocalStorage, username, host::has_touch(&window));

    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("Document unavailable"))?;
    let node = by_id::<HtmlElement>(&document, MOUNT_NODE_ID)?;

    let app = AppHandle::init(&window, &node, &flags)?;
    let mut shell = Shell {
        app,
        port_handlers: Vec::new(),
        resize_handler: None,
    };
    shell.subscribe_ports()?;
    shell.attach_resize_listener(&window)?;

    SHELL.with(|slot| {
        *slot.borrow_mut() = Some(shell);
    });

    Ok(())
}

/// Handle to the embedded application: its `init` entry plus the named
/// `subscribe`/`send` ports on the instance it returns.
struct AppHandle {
    app: JsValue,
}

impl AppHandle {
    fn init(window: &Window, node: &HtmlElement, flags: &Flags) -> Result<Self, JsValue> {
        let module = js_sys::Reflect::get(window.as_ref(), &JsValue::from_str(APP_GLOBAL))?;
        if module.is_undefined() || module.is_null() {
            return Err(JsValue::from_str("embedded application global missing"));
        }

        let init = js_sys::Reflect::get(&module, &JsValue::from_str("init"))?
            .dyn_into::<js_sys::Function>()?;

        let config = js_sys::Object::new();
        js_sys::Reflect::set(config.as_ref(), &JsValue::from_str("node"), node.as_ref())?;
        js_sys::Reflect::set(config.as_ref(), &JsValue::from_str("flags"), &flags.to_js()?)?;

        let app = init.call1(&module, config.as_ref())?;
        Ok(Self { app })
    }

    fn port(&self, name: &str) -> Result<JsValue, JsValue> {
        let ports = js_sys::Reflect::get(&self.app, &JsValue::from_str("ports"))?;
        let port = js_sys::Reflect::get(&ports, &JsValue::from_str(name))?;
        if port.is_undefined() || port.is_null() {
            return Err(JsValue::from_str(&format!("port '{name}' missing")));
        }
        Ok(port)
    }

    fn subscribe(&self, name: &str, callback: &Closure<dyn FnMut(JsValue)>) -> Result<(), JsValue> {
        let port = self.port(name)?;
        let subscribe = js_sys::Reflect::get(&port, &JsValue::from_str("subscribe"))?
            .dyn_into::<js_sys::Function>()?;
        subscribe.call1(&port, callback.as_ref())?;
        Ok(())
    }

    fn send(&self, name: &str, value: &JsValue) -> Result<(), JsValue> {
        let port = self.port(name)?;
        let send = js_sys::Reflect::get(&port, &JsValue::from_str("send"))?
            .dyn_into::<js_sys::Function>()?;
        send.call1(&port, value)?;
        Ok(())
    }
}

struct Shell {
    app: AppHandle,
    // Subscribed closures stay alive for the page lifetime.
    port_handlers: Vec<Closure<dyn FnMut(JsValue)>>,
    resize_handler: Option<Closure<dyn FnMut(web_sys::Event)>>,
}

impl Shell {
    fn subscribe_ports(&mut self) -> Result<(), JsValue> {
        self.subscribe_port(ports::UPDATE_LEVEL, decode_level)?;
        self.subscribe_port(ports::INSTRUCTIONS, decode_instructions)?;
        self.subscribe_port(ports::UPDATE_FASTEST, decode_fastest)?;
        Ok(())
    }

    fn subscribe_port(
        &mut self,
        name: &'static str,
        decode: fn(&JsValue) -> Option<PortMessage>,
    ) -> Result<(), JsValue> {
        let callback = Closure::wrap(Box::new(move |value: JsValue| match decode(&value) {
            Some(message) => ports::apply(&LocalStorage, message),
            None => web_sys::console::warn_1(&JsValue::from_str(&format!(
                "dropping undecodable '{name}' message"
            ))),
        }) as Box<dyn FnMut(JsValue)>);

        self.app.subscribe(name, &callback)?;
        self.port_handlers.push(callback);
        Ok(())
    }

    fn attach_resize_listener(&mut self, window: &Window) -> Result<(), JsValue> {
        let callback = Closure::wrap(Box::new(move |_event: web_sys::Event| {
            SHELL.with(|slot| {
                if let Some(shell) = slot.borrow().as_ref() {
                    let _ = shell.app.send(ports::RESIZE, &JsValue::TRUE);
                }
            });
        }) as Box<dyn FnMut(web_sys::Event)>);

        window.add_event_listener_with_callback("resize", callback.as_ref().unchecked_ref())?;
        self.resize_handler = Some(callback);
        Ok(())
    }
}

fn by_id<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("Missing element with id '{id}'")))?
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("Element '{id}' had unexpected type")))
}

fn decode_level(value: &JsValue) -> Option<PortMessage> {
    let level = value.as_f64()?;
    if level < 0.0 || level > f64::from(u32::MAX) || level.fract() != 0.0 {
        return None;
    }
    Some(PortMessage::UpdateLevel(level as u32))
}

fn decode_instructions(value: &JsValue) -> Option<PortMessage> {
    value.as_bool().map(PortMessage::Instructions)
}

fn decode_fastest(value: &JsValue) -> Option<PortMessage> {
    let raw: String = js_sys::JSON::stringify(value).ok()?.into();
    serde_json::from_str(&raw)
        .ok()
        .map(PortMessage::UpdateFastest)
}
