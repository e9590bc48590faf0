use parking_lot::Mutex;
use sigproxy::{
    ArgBundle, CanonicalNormalizer, ConnectionId, MetaTypeRegistry, Param, ProxyConnections,
    Signature, SignalHost, SignatureSynthesizer, Slot,
};

#[derive(Debug, Clone, PartialEq)]
struct QTime(u32);

#[derive(Debug, Clone, PartialEq)]
struct QUrl(String);

#[derive(Debug, Clone, PartialEq, Default)]
struct MyType {
    text: String,
    owner: i32,
}

impl MyType {
    fn modify(m: &MyType) -> MyType {
        MyType {
            text: m.text.split(' ').last().unwrap_or_default().to_string(),
            owner: m.owner,
        }
    }
}

sigproxy::declare_metatype!(QTime, QUrl, MyType);

const TEST_OBJECT: usize = 0;
const RECEIVER: usize = 1;

/// Registry using the names a widget toolkit would put in its signatures
fn toolkit_registry() -> MetaTypeRegistry {
    let registry = MetaTypeRegistry::new();
    registry.register::<i32>("int").unwrap();
    registry.register::<char>("char").unwrap();
    registry.register::<f32>("float").unwrap();
    registry.register::<f64>("double").unwrap();
    registry.register::<String>("QString").unwrap();
    registry.register::<QTime>("QTime").unwrap();
    registry.register::<QUrl>("QUrl").unwrap();
    registry.register::<MyType>("MyType").unwrap();
    registry
}

/// Two-object host: an emitter and a receiver with typed slots
struct ToolkitHost {
    signals: Vec<Vec<&'static str>>,
    slots: Vec<Vec<&'static str>>,
    subscriptions: Mutex<Vec<(usize, usize, ConnectionId)>>,
    last_int: Mutex<Option<i32>>,
    last_string: Mutex<Option<String>>,
    last_my_type: Mutex<Option<MyType>>,
}

impl ToolkitHost {
    fn new() -> Self {
        Self {
            signals: vec![
                vec![
                    "myId(int)",
                    "myIds(int,int)",
                    "myIds(int,QTime,QUrl)",
                    "myIds(int,char,int,int)",
                    "myIds(int,QString,float,double,float)",
                ],
                vec!["myType(MyType)"],
            ],
            slots: vec![
                vec![],
                vec!["getInt(int)", "getString(QString)", "getMyType(MyType)"],
            ],
            subscriptions: Mutex::new(Vec::new()),
            last_int: Mutex::new(None),
            last_string: Mutex::new(None),
            last_my_type: Mutex::new(None),
        }
    }

    /// Activate every connection subscribed to `signal` on `sender`
    fn emit(
        &self,
        proxy: &ProxyConnections<'_, &ToolkitHost>,
        sender: usize,
        signal: &str,
        args: &ArgBundle<'_>,
    ) {
        let index = self.signal_index(sender, signal).unwrap();
        let subscribed: Vec<ConnectionId> = self
            .subscriptions
            .lock()
            .iter()
            .filter(|(s, i, _)| *s == sender && *i == index)
            .map(|(_, _, id)| *id)
            .collect();
        for id in subscribed {
            unsafe { proxy.activate(id, args).unwrap() };
        }
    }
}

fn first_arg<'b>(args: &'b ArgBundle<'_>) -> &'b Slot {
    args.slot(1).unwrap()
}

impl SignalHost for ToolkitHost {
    type ObjectId = usize;

    fn signal_index(&self, sender: usize, signature: &str) -> Option<usize> {
        self.signals.get(sender)?.iter().position(|s| *s == signature)
    }

    fn slot_index(&self, receiver: usize, signature: &str) -> Option<usize> {
        self.slots.get(receiver)?.iter().position(|s| *s == signature)
    }

    fn check_connect_args(&self, emitted: &str, accepted: &str) -> bool {
        match (Signature::parse(emitted), Signature::parse(accepted)) {
            (Some(emitted), Some(accepted)) => emitted.feeds(&accepted),
            _ => false,
        }
    }

    fn subscribe(&self, sender: usize, signal: usize, connection: ConnectionId) -> bool {
        self.subscriptions.lock().push((sender, signal, connection));
        true
    }

    fn unsubscribe(&self, sender: usize, signal: usize, connection: ConnectionId) {
        self.subscriptions
            .lock()
            .retain(|entry| *entry != (sender, signal, connection));
    }

    fn deliver(&self, receiver: usize, slot: usize, args: &ArgBundle<'_>) {
        assert_eq!(receiver, RECEIVER);
        unsafe {
            match slot {
                0 => *self.last_int.lock() = Some(<i32 as Param>::fetch(first_arg(args))),
                1 => *self.last_string.lock() = Some(<String as Param>::fetch(first_arg(args))),
                2 => *self.last_my_type.lock() = Some(<MyType as Param>::fetch(first_arg(args))),
                _ => unreachable!("no slot {}", slot),
            }
        }
    }
}

fn fmodf(x: f32, y: f32) -> f32 {
    x % y
}

fn exit(_code: i32) {}

fn rand() -> i32 {
    4
}

fn abs(i: i32) -> i32 {
    i.abs()
}

fn mul2(i: i32) -> i32 {
    i * 2
}

fn mul(i: i32, j: i32) -> i32 {
    i * j
}

fn a3(_: i32, _: &QTime, _: &QUrl) -> i32 {
    0
}

fn a4(_: i32, _: char, _: i32, _: i32) -> i32 {
    0
}

fn a5(i: i32, s: &String, _: f32, _: f64, _: f32) -> String {
    format!("{}{}", s, i)
}

#[test]
fn test_connection_type_check() {
    let host = ToolkitHost::new();
    let registry = toolkit_registry();
    let normalizer = CanonicalNormalizer::default();
    let proxy = ProxyConnections::new(&host, SignatureSynthesizer::new(&registry, &normalizer));

    // Input types don't match the signal
    assert!(!proxy.try_connect(TEST_OBJECT, "myId(int)", fmodf, RECEIVER, "getInt(int)"));
    // Void output can't feed an int slot
    assert!(!proxy.try_connect(TEST_OBJECT, "myId(int)", exit, RECEIVER, "getInt(int)"));
    // Signals may carry more arguments than the callable takes
    assert!(proxy.try_connect(TEST_OBJECT, "myId(int)", rand, RECEIVER, "getInt(int)"));
    assert!(proxy.try_connect(TEST_OBJECT, "myId(int)", abs, RECEIVER, "getInt(int)"));

    assert_eq!(proxy.len(), 2);
    assert_eq!(proxy.stats().rejected, 2);
}

#[test]
fn test_connection_args_check() {
    let host = ToolkitHost::new();
    let registry = toolkit_registry();
    let normalizer = CanonicalNormalizer::default();
    let proxy = ProxyConnections::new(&host, SignatureSynthesizer::new(&registry, &normalizer));

    assert!(!proxy.try_connect(TEST_OBJECT, "noSuchSignal(int)", abs, RECEIVER, "getInt(int)"));
    assert!(!proxy.try_connect(TEST_OBJECT, "myId(int)", abs, RECEIVER, "noSuchSlot(int)"));
    assert!(proxy.is_empty());
}

#[test]
fn test_function_pointers() {
    let host = ToolkitHost::new();
    let registry = toolkit_registry();
    let normalizer = CanonicalNormalizer::default();
    let proxy = ProxyConnections::new(&host, SignatureSynthesizer::new(&registry, &normalizer));

    assert!(proxy.try_connect(TEST_OBJECT, "myId(int)", mul2, RECEIVER, "getInt(int)"));
    assert!(proxy.try_connect(TEST_OBJECT, "myIds(int, int)", mul, RECEIVER, "getInt(int)"));

    let id = 42i32;
    host.emit(&proxy, TEST_OBJECT, "myId(int)", &ArgBundle::new().arg(&id));
    assert_eq!(*host.last_int.lock(), Some(mul2(id)));

    host.emit(&proxy, TEST_OBJECT, "myIds(int,int)", &ArgBundle::new().arg(&id).arg(&id));
    assert_eq!(*host.last_int.lock(), Some(mul(id, id)));
    assert_eq!(proxy.stats().activations, 2);
}

#[test]
fn test_custom_types() {
    let host = ToolkitHost::new();
    let registry = toolkit_registry();
    let normalizer = CanonicalNormalizer::default();
    let proxy = ProxyConnections::new(&host, SignatureSynthesizer::new(&registry, &normalizer));

    assert!(proxy.try_connect(
        RECEIVER,
        "myType(const MyType &)",
        MyType::modify,
        RECEIVER,
        "getMyType(const MyType &)",
    ));

    let value = MyType {
        text: "might be changed".to_string(),
        owner: 42,
    };
    host.emit(&proxy, RECEIVER, "myType(MyType)", &ArgBundle::new().arg(&value));

    let received = host.last_my_type.lock().clone().unwrap();
    assert_eq!(received, MyType::modify(&value));
    assert_eq!(received.text, "changed");
    assert_eq!(value.text, "might be changed");
}

#[test]
fn test_long_signatures() {
    let host = ToolkitHost::new();
    let registry = toolkit_registry();
    let normalizer = CanonicalNormalizer::default();
    let proxy = ProxyConnections::new(&host, SignatureSynthesizer::new(&registry, &normalizer));

    assert!(proxy.try_connect(TEST_OBJECT, "myId(int)", mul2, RECEIVER, "getInt(int)"));
    assert!(proxy.try_connect(TEST_OBJECT, "myIds(int, int)", mul, RECEIVER, "getInt(int)"));
    assert!(proxy.try_connect(
        TEST_OBJECT,
        "myIds(int, const QTime &, const QUrl &)",
        a3,
        RECEIVER,
        "getInt(int)",
    ));
    assert!(proxy.try_connect(TEST_OBJECT, "myIds(int, char, int, int)", a4, RECEIVER, "getInt(int)"));
    assert!(proxy.try_connect(
        TEST_OBJECT,
        "myIds(int, const QString &, float, double, float)",
        a5,
        RECEIVER,
        "getString(const QString &)",
    ));
    assert_eq!(proxy.len(), 5);

    let (i, s, f, d) = (7i32, String::from("id"), 1.0f32, 2.0f64);
    host.emit(
        &proxy,
        TEST_OBJECT,
        "myIds(int,QString,float,double,float)",
        &ArgBundle::new().arg(&i).arg(&s).arg(&f).arg(&d).arg(&f),
    );
    assert_eq!(host.last_string.lock().as_deref(), Some("id7"));
}

#[test]
fn test_raw_host_slots() {
    let host = ToolkitHost::new();
    let registry = toolkit_registry();
    let normalizer = CanonicalNormalizer::default();
    let proxy = ProxyConnections::new(&host, SignatureSynthesizer::new(&registry, &normalizer));

    let id = proxy
        .connect(TEST_OBJECT, "myIds(int,int)", mul, RECEIVER, "getInt(int)")
        .unwrap();

    // Hosts that keep their own slot arrays hand them over untagged
    let (mut a, mut b) = (6i32, 7i32);
    let ptrs = [
        core::ptr::null_mut(),
        &mut a as *mut i32 as *mut (),
        &mut b as *mut i32 as *mut (),
    ];
    unsafe {
        let args = ArgBundle::from_raw(&ptrs);
        proxy.activate(id, &args).unwrap();
    }
    assert_eq!(*host.last_int.lock(), Some(42));
}
